//! Prompt Templates
//!
//! Pure string templating that turns a [`Submission`] into the
//! natural-language instruction sent to the completion service. No I/O, no
//! escaping; HTML rendering downstream is responsible for escaping.

use crate::reading::{Submission, Tier};

/// Section labels of the free reading, in the order they must appear
pub const FREE_SECTIONS: [&str; 3] = [
    "Personality tendencies",
    "This month's fortune",
    "Advice on the question",
];

/// Section labels of the premium reading, in the order they must appear
pub const PREMIUM_SECTIONS: [&str; 4] = [
    "Core personality and subconscious",
    "Current fortune and life cycle",
    "Multi-angle advice on the question",
    "Action guidance and timing for attracting luck",
];

/// Fixed system message for a tier
pub fn system_prompt(tier: Tier) -> &'static str {
    match tier {
        Tier::Free => "You are a professional fortune teller.",
        Tier::Premium => {
            "You are a professional fortune teller delivering a comprehensive paid reading."
        }
    }
}

/// Build the user prompt for a submission at the given tier
///
/// Deterministic: the same submission and tier always produce byte-identical
/// output. Inputs are embedded verbatim.
pub fn build_prompt(submission: &Submission, tier: Tier) -> String {
    match tier {
        Tier::Free => format!(
            "You are a professional fortune teller. Based on the information below, \
             give this person a gentle and careful numerology reading of their \
             character and their fortune for this month.\n\
             \n\
             Details:\n\
             Name: {}\n\
             Birthdate: {}\n\
             Question: {}\n\
             \n\
             Structure of the reading:\n\
             1. {}\n\
             2. {}\n\
             3. {} (from a numerology standpoint)\n",
            submission.name,
            submission.birthdate,
            submission.question,
            FREE_SECTIONS[0],
            FREE_SECTIONS[1],
            FREE_SECTIONS[2],
        ),
        Tier::Premium => format!(
            "You are a professional fortune teller. Based on the information below, \
             give this person a careful, comprehensive numerology reading.\n\
             \n\
             Details:\n\
             Name: {}\n\
             Birthdate: {}\n\
             Question: {}\n\
             \n\
             Structure of the detailed reading:\n\
             1. {}\n\
             2. {}\n\
             3. {} (work, money, relationships)\n\
             4. {}\n",
            submission.name,
            submission.birthdate,
            submission.question,
            PREMIUM_SECTIONS[0],
            PREMIUM_SECTIONS[1],
            PREMIUM_SECTIONS[2],
            PREMIUM_SECTIONS[3],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission::new("Alice Example", "1990-01-01", "How is my career looking?")
    }

    /// Assert that `needles` appear in `haystack` in the given order
    fn assert_ordered(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            let pos = haystack[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle:?}"));
            from += pos + needle.len();
        }
    }

    #[test]
    fn test_free_prompt_contains_inputs_and_sections_in_order() {
        let prompt = build_prompt(&submission(), Tier::Free);

        assert_ordered(
            &prompt,
            &["Alice Example", "1990-01-01", "How is my career looking?"],
        );
        assert_ordered(&prompt, &FREE_SECTIONS);
    }

    #[test]
    fn test_premium_prompt_contains_inputs_and_sections_in_order() {
        let prompt = build_prompt(&submission(), Tier::Premium);

        assert_ordered(
            &prompt,
            &["Alice Example", "1990-01-01", "How is my career looking?"],
        );
        assert_ordered(&prompt, &PREMIUM_SECTIONS);
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let sub = submission();
        for tier in [Tier::Free, Tier::Premium] {
            assert_eq!(build_prompt(&sub, tier), build_prompt(&sub, tier));
        }
    }

    #[test]
    fn test_tiers_use_distinct_templates() {
        let sub = submission();
        assert_ne!(
            build_prompt(&sub, Tier::Free),
            build_prompt(&sub, Tier::Premium)
        );
        assert_ne!(system_prompt(Tier::Free), system_prompt(Tier::Premium));
    }
}
