use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Readable article text pulled out of a fetched page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub url: Url,
    pub title: String,
    pub language: Option<String>,
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

/// Intermediate result of the readability pass, before normalization
/// and the length gate.
#[derive(Debug)]
pub struct ReadableContent {
    pub title: String,
    pub text: String,
}

pub fn normalize_whitespace(text: &str) -> String {
    let text = text.trim();

    // Collapse runs of spaces/tabs, then squeeze blank-line runs down to
    // a single paragraph break.
    let space_regex = regex::Regex::new(r"[ \t]+").unwrap();
    let spaced = space_regex.replace_all(text, " ");

    let newline_regex = regex::Regex::new(r"\n\s*\n+").unwrap();
    newline_regex.replace_all(&spaced, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_spaces_and_blank_lines() {
        let text = "  Breaking    news  \n\n\n  More detail  ";
        assert_eq!(normalize_whitespace(text), "Breaking news \n\n More detail");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(normalize_whitespace("one two"), "one two");
    }
}
