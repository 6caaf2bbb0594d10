//! Inline syntax extraction: `[[Wiki Links]]` and `#hashtags`.
//!
//! Both functions are pure and total. They never touch storage.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WIKILINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("wikilink regex"));

// ASCII word characters plus hyphen, so `# Heading` and `##` never match.
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_-]+)").expect("tag regex"));

/// Every `[[...]]` target in order of appearance, duplicates preserved.
pub fn parse_links(body: &str) -> Vec<String> {
    WIKILINK_REGEX
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Distinct tags without the leading `#`, in order of first appearance.
///
/// Case is kept as written, so `#Rust` and `#rust` are two tags.
pub fn extract_tags(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_REGEX
        .captures_iter(body)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_keep_order_and_duplicates() {
        let links = parse_links("See [[Alpha]] and [[Beta]] and [[Alpha]]");
        assert_eq!(links, vec!["Alpha", "Beta", "Alpha"]);
    }

    #[test]
    fn links_are_non_greedy() {
        let links = parse_links("[[One]] middle [[Two Words]]");
        assert_eq!(links, vec!["One", "Two Words"]);
    }

    #[test]
    fn no_links_yields_empty() {
        assert!(parse_links("plain text with [single] brackets").is_empty());
        assert!(parse_links("").is_empty());
    }

    #[test]
    fn links_do_not_span_lines() {
        assert!(parse_links("[[broken\nlink]]").is_empty());
    }

    #[test]
    fn tags_are_deduplicated() {
        assert_eq!(extract_tags("Feeling #happy and #happy again"), vec!["happy"]);
    }

    #[test]
    fn tags_keep_case_and_hyphens() {
        let tags = extract_tags("#Rust #rust #deep-work #snake_case");
        assert_eq!(tags, vec!["Rust", "rust", "deep-work", "snake_case"]);
    }

    #[test]
    fn headings_are_not_tags() {
        assert!(extract_tags("# Title\n\n## Section\nbody").is_empty());
    }

    #[test]
    fn tag_extraction_is_deterministic() {
        let body = "#b #a #c #a #b";
        assert_eq!(extract_tags(body), extract_tags(body));
        assert_eq!(extract_tags(body), vec!["b", "a", "c"]);
    }
}
