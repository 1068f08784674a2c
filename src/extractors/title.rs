//! Title extraction.
//!
//! The `<title>` element is the primary source. When it carries a site
//! suffix (`Headline | Site`), the piece matching the main heading or the
//! Open Graph title is kept; otherwise the longest piece.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{self, Document, Selection};

/// Separators between headline and site name in `<title>`.
#[allow(clippy::expect_used)]
static TITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[\|–—·»/_-]\s+|\s*\|\s*|\s+::\s+").expect("valid regex"));

/// Pieces shorter than this are not considered a headline on their own.
const MIN_PIECE_LEN: usize = 10;

/// Extract the article title, or an empty string.
#[must_use]
pub fn extract_title(doc: &Document) -> String {
    let title_text = dom::normalize_whitespace(&doc.select("title").text());
    let og_title = meta_title(doc);
    let heading = main_heading(doc);

    if title_text.is_empty() {
        return og_title.or(heading).unwrap_or_default();
    }

    for candidate in [heading.as_deref(), og_title.as_deref()].into_iter().flatten() {
        if same_title(candidate, &title_text) {
            return title_text;
        }
    }

    let pieces: Vec<&str> = TITLE_SEPARATOR
        .split(&title_text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if pieces.len() < 2 {
        return title_text;
    }

    for candidate in [heading.as_deref(), og_title.as_deref()].into_iter().flatten() {
        if let Some(piece) = pieces.iter().find(|p| same_title(p, candidate)) {
            return (*piece).to_string();
        }
    }

    pieces
        .iter()
        .max_by_key(|p| p.chars().count())
        .filter(|p| p.chars().count() > MIN_PIECE_LEN)
        .map_or(title_text.clone(), |p| (*p).to_string())
}

fn meta_title(doc: &Document) -> Option<String> {
    doc.select(r#"meta[property="og:title"], meta[name="og:title"], meta[name="twitter:title"]"#)
        .nodes()
        .iter()
        .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), "content"))
        .map(|t| dom::normalize_whitespace(&t))
}

/// Longest `<h1>` text.
fn main_heading(doc: &Document) -> Option<String> {
    doc.select("h1")
        .nodes()
        .iter()
        .map(|n| dom::normalize_whitespace(&Selection::from(*n).text()))
        .filter(|t| !t.is_empty())
        .max_by_key(|t| t.chars().count())
}

/// Case, punctuation and whitespace-insensitive title equality.
pub(crate) fn same_title(a: &str, b: &str) -> bool {
    let norm = |s: &str| {
        s.chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    };
    let (a, b) = (norm(a), norm(b));
    !a.is_empty() && a == b
}
