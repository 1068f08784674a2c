//! Destructive boilerplate removal on the working tree.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{self, Document, Selection};

/// Elements removed with their content.
const TAGS_TO_REMOVE: &str =
    "script, style, noscript, template, form, nav, aside, footer, button, input, select, textarea, svg, canvas";

/// Inline wrappers unwrapped inside paragraphs.
const INLINE_TAGS_TO_STRIP: &[&str] = &["span", "em"];

/// Children that keep a `<div>` from being read as a paragraph.
const BLOCK_CHILDREN: &str = "a, blockquote, dl, div, img, ol, p, pre, table, ul, figure, section, article";

/// Whole class tokens or ids of boilerplate blocks.
#[allow(clippy::expect_used)]
static BAD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(side|combx|retweet|mediaarticlerelated|menucontainer|navbar|utility-bar|inline-share-tools|comments?|popularquestions|contact|foot|footer|footnote|links|shoutbox|sponsor|tags|socialnetworking|pagetools|post-attributes|communitypromo|subscribe|vcard|print|popup|author-dropdown|tools|socialtools|byline|breadcrumbs?|wp-caption-text|timestamp|js_replies)$",
    )
    .expect("valid regex")
});

/// Boilerplate words as a `-`/`_` separated part of a class token or id.
#[allow(clippy::expect_used)]
static BOILERPLATE_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[-_])(?:nav|navigation|menu|share|sharing|social|related|newsletter|promo|advert|advertisement|ads?|cookie|consent|gdpr|outbrain|taboola)(?:[-_]|$)",
    )
    .expect("valid regex")
});

/// Removes scripts, navigation, sharing widgets and similar boilerplate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCleaner;

impl DocumentCleaner {
    /// Create a cleaner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Clean `doc` in place.
    pub fn clean(&self, doc: &Document) {
        doc.select(TAGS_TO_REMOVE).remove();
        remove_boilerplate_blocks(doc);
        doc.select("p").strip_elements(INLINE_TAGS_TO_STRIP);
        divs_to_paragraphs(doc);
    }
}

/// Whether the class or id of `sel` marks it as boilerplate.
#[must_use]
pub fn is_boilerplate(sel: &Selection) -> bool {
    let class = dom::get_attribute(sel, "class").unwrap_or_default();
    let id = dom::get_attribute(sel, "id").unwrap_or_default();
    let name = dom::get_attribute(sel, "name").unwrap_or_default();

    let matched = class
        .split_whitespace()
        .chain([id.trim(), name.trim()])
        .filter(|token| !token.is_empty())
        .any(|token| BAD_NAME.is_match(token) || BOILERPLATE_PART.is_match(token));
    matched
}

fn remove_boilerplate_blocks(doc: &Document) {
    let doomed: Vec<Selection> = doc
        .select("body [class], body [id], body [name]")
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .filter(|sel| !matches!(dom::tag_name(sel).as_deref(), Some("html" | "body" | "article" | "main")))
        .filter(is_boilerplate)
        .collect();

    for sel in doomed {
        sel.remove();
    }
}

/// `<div>`s holding only text and inline markup become `<p>`s.
fn divs_to_paragraphs(doc: &Document) {
    for node in doc.select("div").nodes() {
        let div = Selection::from(*node);
        if div.select(BLOCK_CHILDREN).is_empty() && !div.text().trim().is_empty() {
            div.rename("p");
        }
    }
}
