//! Author extraction from meta tags and byline elements.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{self, Document, Selection};

/// Meta tags naming the author.
const AUTHOR_META: &str = r#"meta[name="author"], meta[property="article:author"], meta[name="dc.creator"], meta[name="DC.creator"], meta[name="byl"], meta[name="sailthru.author"], meta[name="parsely-author"]"#;

/// Elements whose text is a byline.
const AUTHOR_ELEMENTS: &str = r#"[itemprop="author"], [rel="author"], [class*="byline"], [class~="author"], [class*="author-name"], [id*="byline"]"#;

/// "By", "Written by", "Posted by" prefixes.
#[allow(clippy::expect_used)]
static BYLINE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:(?:written|posted|reported)\s+)?by\s*:?\s+").expect("valid regex"));

/// Separators between several names in one byline.
#[allow(clippy::expect_used)]
static NAME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:,|&|\||/|\band\b)\s*").expect("valid regex"));

/// Author names, meta tags first, then byline elements; deduplicated.
#[must_use]
pub fn extract_authors(doc: &Document) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();

    let from_meta = doc
        .select(AUTHOR_META)
        .nodes()
        .iter()
        .filter_map(|n| dom::non_empty_attribute(&Selection::from(*n), "content"))
        .collect::<Vec<_>>();

    let from_elements = doc
        .select(AUTHOR_ELEMENTS)
        .nodes()
        .iter()
        .map(|n| {
            let el = Selection::from(*n);
            dom::non_empty_attribute(&el, "content").unwrap_or_else(|| el.text().to_string())
        })
        .collect::<Vec<_>>();

    for raw in from_meta.iter().chain(&from_elements) {
        for name in split_names(raw) {
            if !authors.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
                authors.push(name);
            }
        }
    }

    authors
}

/// Split a byline into individual names, dropping anything that does not
/// look like a person's name.
fn split_names(raw: &str) -> Vec<String> {
    let line = dom::normalize_whitespace(raw);
    let line = BYLINE_PREFIX.replace(&line, "");

    NAME_SEPARATOR
        .split(&line)
        .map(|n| n.trim().trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|n| looks_like_name(n))
        .collect()
}

/// Reject URLs, handles, IDs, JSON and overlong strings.
fn looks_like_name(name: &str) -> bool {
    let len = name.chars().count();
    if !(2..=60).contains(&len) {
        return false;
    }
    if name.contains("://") || name.starts_with("www.") || name.contains('@') {
        return false;
    }
    if name.starts_with('{') || name.starts_with('[') {
        return false;
    }
    if name.chars().filter(char::is_ascii_digit).count() > 3 {
        return false;
    }
    if name.split_whitespace().count() > 5 {
        return false;
    }
    let special = name
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace() && !matches!(c, '-' | '\'' | '.'))
        .count();
    special <= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_author() {
        let doc = Document::from(r#"<meta name="author" content="Jane Doe">"#);
        assert_eq!(extract_authors(&doc), vec!["Jane Doe"]);
    }

    #[test]
    fn byline_with_several_names() {
        let doc = Document::from(
            r#"<div class="byline">By Jane Doe, John Smith and Ana Ruiz</div>"#,
        );
        assert_eq!(extract_authors(&doc), vec!["Jane Doe", "John Smith", "Ana Ruiz"]);
    }

    #[test]
    fn deduplicates_across_sources() {
        let doc = Document::from(
            r#"<html><head><meta name="author" content="Jane Doe"></head>
               <body><span itemprop="author">jane doe</span><a rel="author">Max Power</a></body></html>"#,
        );
        assert_eq!(extract_authors(&doc), vec!["Jane Doe", "Max Power"]);
    }

    #[test]
    fn rejects_non_names() {
        assert!(!looks_like_name("https://x.test/staff"));
        assert!(!looks_like_name("@janedoe"));
        assert!(!looks_like_name("x"));
        assert!(!looks_like_name("12345678"));
        assert!(looks_like_name("Jean-Pierre O'Connor"));
    }

    #[test]
    fn no_authors() {
        assert!(extract_authors(&Document::from("<p>Anonymous text</p>")).is_empty());
    }
}
