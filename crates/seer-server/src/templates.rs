//! HTML Pages
//!
//! One askama template per page; the free and premium result pages share one
//! template parameterized by tier.

use askama::Template;
use axum::response::Html;
use seer_core::{GeneratedResult, Tier};

use crate::error::AppError;

/// Submission form
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormPage;

/// Free or premium reading page
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub premium: bool,
    pub result_html: String,
}

impl ResultPage {
    pub fn new(result: &GeneratedResult) -> Self {
        Self {
            premium: result.tier == Tier::Premium,
            result_html: render_result(&result.text),
        }
    }
}

/// User-visible error page
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub message: String,
}

/// Render a template into an HTML response body
pub fn render_page<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// Turn raw reading text into an HTML fragment: escape, then convert line
/// breaks to `<br>`
pub fn render_result(result_text: &str) -> String {
    escape_html(result_text)
        .replace("\r\n", "\n")
        .replace('\n', "<br>\n")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_result_escapes_html() {
        let html = render_result("<b>fate</b> & fortune");
        assert_eq!(html, "&lt;b&gt;fate&lt;/b&gt; &amp; fortune");
    }

    #[test]
    fn test_render_result_converts_line_breaks() {
        let html = render_result("one\ntwo\r\nthree");
        assert_eq!(html, "one<br>\ntwo<br>\nthree");
    }

    #[test]
    fn test_result_page_tier_flag() {
        let free = ResultPage::new(&GeneratedResult::new("text", Tier::Free));
        assert!(!free.premium);

        let premium = ResultPage::new(&GeneratedResult::new("text", Tier::Premium));
        assert!(premium.premium);
    }

    #[test]
    fn test_pages_render() {
        assert!(FormPage.render().is_ok());
        assert!(
            ResultPage::new(&GeneratedResult::new("a\nreading", Tier::Premium))
                .render()
                .is_ok()
        );
        assert!(
            (ErrorPage {
                message: "boom".into()
            })
            .render()
            .is_ok()
        );
    }
}
