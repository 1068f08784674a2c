//! DOM adapter over the `dom_query` crate.
//!
//! This is the content-parser seam: parsing markup into an owned tree,
//! evaluating selector expressions, deep copies and a few node helpers.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, Selection};

pub use tendril::StrTendril;

use regex::Regex;
use std::sync::LazyLock;

/// `N; url=TARGET` inside a refresh directive.
#[allow(clippy::expect_used)]
static REFRESH_TARGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^\s*[\d.]*\s*[;,]\s*(?:url\s*=\s*)?["']?([^"']+)["']?\s*$"#).expect("valid regex")
});

// === Parsing ===

/// Parse markup into a document tree.
///
/// Blank markup yields `None`; anything else parses (html5ever recovers
/// from malformed input).
#[must_use]
pub fn parse(markup: &str) -> Option<Document> {
    if markup.trim().is_empty() {
        return None;
    }
    Some(Document::from(markup))
}

/// Independent deep copy of a document.
///
/// The copy shares no nodes with `doc`; mutating one never affects the other.
#[must_use]
pub fn clone_document(doc: &Document) -> Document {
    Document::from(doc.html().to_string())
}

/// Deep copy of a single node as the root of a new, detached document.
#[must_use]
pub fn clone_element(sel: &Selection) -> Document {
    Document::from(standalone_html(sel))
}

/// Outer HTML of `sel` that parses back to the same subtree on its own.
///
/// Table parts are only valid inside a `<table>`; outside one the parser
/// drops their tags and hoists the children, so they get their table
/// context back.
#[must_use]
pub fn standalone_html(sel: &Selection) -> String {
    let html = outer_html(sel);
    match tag_name(sel).as_deref() {
        Some("tr" | "tbody" | "thead" | "tfoot" | "caption" | "colgroup") => format!("<table>{html}</table>"),
        Some("td" | "th") => format!("<table><tr>{html}</tr></table>"),
        _ => html.to_string(),
    }
}

/// Root of a detached fragment document.
///
/// The single element under `<body>` when there is exactly one, otherwise
/// `<body>` itself so no content is lost.
#[must_use]
pub fn fragment_root(doc: &Document) -> Option<Selection<'_>> {
    let body = doc.select("body");
    let node = body.nodes().first().copied()?;
    let elements = body.children();
    let has_loose_text = node
        .children()
        .iter()
        .any(|c| c.is_text() && !c.text().trim().is_empty());
    match (elements.length(), has_loose_text) {
        (0, false) => None,
        (1, false) => Some(elements),
        _ => Some(body),
    }
}

// === Selection ===

/// Evaluate a selector expression against `doc`.
///
/// Invalid selectors and empty results both yield `None`.
#[must_use]
pub fn select_nodes<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return None;
    }
    doc.try_select(selector).filter(|sel| !sel.is_empty())
}

/// Node id of the first node in a selection.
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|n| n.id)
}

/// Find the element with `id` in `doc`.
#[must_use]
pub fn find_node(doc: &Document, id: NodeId) -> Option<Selection<'_>> {
    doc.select("*")
        .nodes()
        .iter()
        .find(|n| n.id == id)
        .map(|n| Selection::from(*n))
}

// === Node information ===

/// Any attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Non-blank, trimmed attribute value.
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// All text of the node and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Outer HTML of the selection.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Collapse runs of whitespace into single spaces and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// === Indirection ===

/// Target of a `<meta http-equiv="refresh">` directive, if present.
///
/// The target is returned as written (possibly relative); callers resolve it.
#[must_use]
pub fn extract_meta_refresh(html: &str) -> Option<String> {
    let doc = parse(html)?;
    let content = doc
        .select("meta[http-equiv]")
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .find(|meta| {
            get_attribute(meta, "http-equiv").is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"))
        })
        .and_then(|meta| get_attribute(&meta, "content"))?;

    REFRESH_TARGET_RE
        .captures(&content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_is_none() {
        assert!(parse("").is_none());
        assert!(parse("  \n ").is_none());
        assert!(parse("<p>x</p>").is_some());
    }

    #[test]
    fn test_clone_document_is_independent() {
        let doc = Document::from("<html><body><p>keep</p><div class='ad'>ad</div></body></html>");
        let copy = clone_document(&doc);

        copy.select("div.ad").remove();

        assert_eq!(copy.select("div.ad").length(), 0);
        assert_eq!(doc.select("div.ad").length(), 1);
    }

    #[test]
    fn test_select_nodes_invalid_selector() {
        let doc = Document::from("<a href='/x'>x</a>");
        assert!(select_nodes(&doc, "a[href").is_none());
        assert!(select_nodes(&doc, "").is_none());
        assert!(select_nodes(&doc, "span").is_none());
        assert!(select_nodes(&doc, "a").is_some());
    }

    #[test]
    fn test_find_node_by_id() {
        let doc = Document::from("<div><p class='target'>x</p></div>");
        let id = node_id(&doc.select("p.target")).unwrap();
        let found = find_node(&doc, id).unwrap();
        assert_eq!(tag_name(&found).as_deref(), Some("p"));
    }

    #[test]
    fn test_fragment_root() {
        let doc = clone_element(&Document::from("<section><p>a</p></section>").select("section"));
        let root = fragment_root(&doc).unwrap();
        assert_eq!(tag_name(&root).as_deref(), Some("section"));
    }

    #[test]
    fn test_clone_element_keeps_table_rows() {
        let page = Document::from(
            "<table><tr><td><p>first</p><p>second</p><p>third</p></td></tr></table>",
        );
        for selector in ["tr", "td", "tbody"] {
            let copy = clone_element(&page.select(selector));
            let root = fragment_root(&copy).unwrap();
            let text = normalize_whitespace(&root.text());
            assert_eq!(text, "firstsecondthird", "{selector}");
            assert_eq!(root.select("p").length(), 3, "{selector}");
        }
    }

    #[test]
    fn test_fragment_root_keeps_every_top_level_child() {
        let doc = Document::from("<p>one</p><p>two</p>");
        let root = fragment_root(&doc).unwrap();
        assert_eq!(tag_name(&root).as_deref(), Some("body"));
        assert_eq!(root.select("p").length(), 2);
    }

    #[test]
    fn test_extract_meta_refresh_variants() {
        let html = r#"<html><head><meta http-equiv="refresh" content="0; url=https://x.test/next"></head></html>"#;
        assert_eq!(extract_meta_refresh(html).as_deref(), Some("https://x.test/next"));

        let html = r#"<meta HTTP-EQUIV="Refresh" CONTENT="5;URL='/relative/page'">"#;
        assert_eq!(extract_meta_refresh(html).as_deref(), Some("/relative/page"));

        let html = r#"<meta http-equiv="refresh" content="30">"#;
        assert_eq!(extract_meta_refresh(html), None);

        assert_eq!(extract_meta_refresh("<p>no refresh</p>"), None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
    }
}
