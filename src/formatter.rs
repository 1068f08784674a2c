//! Turns a content node into plain body text and simplified body HTML.

use std::sync::LazyLock;

use dom_query::NodeRef;
use regex::Regex;

use crate::dom::{self, Selection};
use crate::extractors::title;

/// Tags whose content never reaches the output.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "iframe", "svg", "head", "title"];

/// Tags that start a new line of text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "header", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "pre", "ul", "ol", "li", "dl", "dt", "dd", "table", "tr", "figure", "figcaption",
];

/// Tags kept (without attributes, except links) in the HTML output.
const KEPT_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "ul", "ol", "li", "dl", "dt",
    "dd", "strong", "em", "b", "i", "a", "table", "tr", "td", "th", "figure", "figcaption",
];

#[allow(clippy::expect_used)]
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:!?])").expect("valid regex"));

/// Body formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter;

impl OutputFormatter {
    /// Create a formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Format `node` into `(text, html)`.
    ///
    /// Paragraphs in the text are separated by blank lines. A heading that
    /// repeats `title` is left out of both outputs.
    #[must_use]
    pub fn format(&self, node: &Selection, title: &str) -> (String, String) {
        let Some(root) = node.nodes().first().copied() else {
            return (String::new(), String::new());
        };

        let mut walker = Walker {
            title,
            text: String::new(),
            html: String::new(),
        };
        walker.visit(root);

        (normalize_text(&walker.text), walker.html.trim().to_string())
    }
}

struct Walker<'t> {
    title: &'t str,
    text: String,
    html: String,
}

impl Walker<'_> {
    fn visit(&mut self, node: NodeRef<'_>) {
        if node.is_text() {
            let text = node.text();
            self.text.push_str(&text);
            self.html.push_str(&escape_html(&text));
            return;
        }
        if !node.is_element() {
            for child in node.children() {
                self.visit(child);
            }
            return;
        }

        let tag = node.node_name().map(|t| t.to_ascii_lowercase()).unwrap_or_default();
        if SKIPPED_TAGS.contains(&tag.as_str()) {
            return;
        }
        if tag == "br" {
            self.text.push('\n');
            self.html.push_str("<br>");
            return;
        }
        if is_heading(&tag) && self.repeats_title(node) {
            return;
        }

        let block = BLOCK_TAGS.contains(&tag.as_str());
        let kept = KEPT_TAGS.contains(&tag.as_str());

        if block {
            self.text.push('\n');
        }
        if kept {
            self.open_tag(&tag, node);
        }
        for child in node.children() {
            self.visit(child);
        }
        if kept {
            self.html.push_str("</");
            self.html.push_str(&tag);
            self.html.push('>');
        }
        if block {
            self.text.push('\n');
        }
    }

    fn open_tag(&mut self, tag: &str, node: NodeRef<'_>) {
        self.html.push('<');
        self.html.push_str(tag);
        if tag == "a" {
            if let Some(href) = dom::get_attribute(&Selection::from(node), "href") {
                self.html.push_str(" href=\"");
                self.html.push_str(&escape_html(&href));
                self.html.push('"');
            }
        }
        self.html.push('>');
    }

    fn repeats_title(&self, node: NodeRef<'_>) -> bool {
        !self.title.is_empty() && title::same_title(&node.text(), self.title)
    }
}

fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Collapse whitespace within lines, drop blank lines, and separate the
/// remaining lines with blank lines.
fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(dom::normalize_whitespace)
        .filter(|line| !line.is_empty())
        .map(|line| SPACE_BEFORE_PUNCT.replace_all(&line, "$1").into_owned())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
