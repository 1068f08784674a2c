//! Outbound links inside the article body.

use crate::dom::{self, Selection};
use crate::url_utils;

/// `href` prefixes that never lead to another document.
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "#", "mailto:"];

/// Collects the absolute targets of anchors inside a content node.
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    links: Vec<String>,
}

impl LinkExtractor {
    /// Empty extractor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract links from `top_node`, resolving them against `article_url`.
    ///
    /// Replaces any previous result. Without a node nothing changes.
    pub fn parse(&mut self, top_node: Option<&Selection>, article_url: &str) {
        let Some(node) = top_node else {
            return;
        };
        self.links = article_links(node, article_url);
    }

    /// Links found by the last [`LinkExtractor::parse`].
    #[must_use]
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Consume the extractor, returning its links.
    #[must_use]
    pub fn into_links(self) -> Vec<String> {
        self.links
    }
}

/// Anchor targets under `node`, in document order, duplicates kept.
///
/// Empty hrefs, fragments, `javascript:` and `mailto:` links are skipped,
/// as are hrefs that do not resolve against `article_url`.
#[must_use]
pub fn article_links(node: &Selection, article_url: &str) -> Vec<String> {
    node.select("a")
        .nodes()
        .iter()
        .filter_map(|n| dom::get_attribute(&Selection::from(*n), "href"))
        .filter_map(|href| {
            let href = href.trim();
            if href.is_empty() || SKIPPED_PREFIXES.iter().any(|p| href.starts_with(p)) {
                return None;
            }
            url_utils::urljoin_if_valid(article_url, href)
        })
        .collect()
}
