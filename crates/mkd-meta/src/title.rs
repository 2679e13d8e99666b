//! Display title resolution.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::Metadata;

/// First level-1 ATX heading on its own line.
static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("H1 pattern is valid"));

/// Text of the first `# Heading` line in `body`.
#[must_use]
pub fn extract_title(body: &str) -> Option<String> {
    H1_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|title| !title.is_empty())
}

/// Resolve a display title: metadata `title` > first H1 > `fallback`.
#[must_use]
pub fn display_title(metadata: Option<&Metadata>, body: &str, fallback: &str) -> String {
    metadata
        .and_then(|m| m.get("title"))
        .and_then(scalar_title)
        .or_else(|| extract_title(body))
        .unwrap_or_else(|| fallback.to_owned())
}

fn scalar_title(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_first_h1() {
        let body = "Intro\n\n# First\n\n# Second";
        assert_eq!(extract_title(body), Some("First".to_owned()));
    }

    #[test]
    fn test_extract_title_ignores_h2() {
        assert_eq!(extract_title("## Sub\n\nText"), None);
    }

    #[test]
    fn test_extract_title_requires_space() {
        assert_eq!(extract_title("#hashtag\n"), None);
    }

    #[test]
    fn test_extract_title_trims_crlf() {
        assert_eq!(extract_title("# Title\r\nBody"), Some("Title".to_owned()));
    }

    #[test]
    fn test_display_title_prefers_metadata() {
        let metadata: Metadata = serde_yaml::from_str("title: From Meta").unwrap();
        assert_eq!(
            display_title(Some(&metadata), "# From Body", "a.md"),
            "From Meta"
        );
    }

    #[test]
    fn test_display_title_falls_back_to_h1() {
        let metadata: Metadata = serde_yaml::from_str("tags: [x]").unwrap();
        assert_eq!(
            display_title(Some(&metadata), "# From Body", "a.md"),
            "From Body"
        );
    }

    #[test]
    fn test_display_title_falls_back_to_path() {
        assert_eq!(display_title(None, "No heading", "guide/a.md"), "guide/a.md");
    }

    #[test]
    fn test_display_title_ignores_blank_metadata_title() {
        let metadata: Metadata = serde_yaml::from_str("title: ''").unwrap();
        assert_eq!(display_title(Some(&metadata), "# Body", "a.md"), "Body");
    }
}
