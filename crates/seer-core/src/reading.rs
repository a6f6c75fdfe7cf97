//! Reading Domain Types
//!
//! A reading is produced from one user [`Submission`] at one of two service
//! [`Tier`]s. The submission lives in the browser session so the paid flow
//! survives the checkout redirect round-trip.

use serde::{Deserialize, Serialize};

/// The user-provided name/birthdate/question triple for one session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Full name, as entered
    pub name: String,

    /// Birthdate, as entered (no format enforcement beyond presence)
    pub birthdate: String,

    /// What the user wants guidance on
    pub question: String,
}

impl Submission {
    pub fn new(
        name: impl Into<String>,
        birthdate: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birthdate: birthdate.into(),
            question: question.into(),
        }
    }

    /// All three fields are present and non-blank
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.birthdate.trim().is_empty()
            && !self.question.trim().is_empty()
    }
}

/// Service level of a reading request
///
/// Selected implicitly by which route handled the request; determines the
/// prompt template, system message, and model identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated reading, tagged with the tier that produced it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedResult {
    /// Text returned verbatim by the completion service
    pub text: String,

    /// Tier the reading was generated at
    pub tier: Tier,
}

impl GeneratedResult {
    pub fn new(text: impl Into<String>, tier: Tier) -> Self {
        Self {
            text: text.into(),
            tier,
        }
    }
}
