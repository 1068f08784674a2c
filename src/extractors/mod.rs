//! Content extraction collaborators.
//!
//! [`ContentExtractor`] is the seam the parse step drives: title, authors,
//! page metadata, publish date, best-content node, media. [`DefaultExtractor`]
//! implements it with meta-tag and DOM heuristics; callers can substitute
//! their own implementation per article.

pub mod authors;
pub mod content;
pub mod links;
pub mod media;
pub mod metadata;
pub mod pubdate;
pub mod title;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::dom::{Document, Selection};
use crate::stopwords;

pub use links::LinkExtractor;

/// Page-level metadata gathered from `<meta>`/`<link>` tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Declared language (ISO 639-1, lowercase).
    pub language: Option<String>,
    /// `og:site_name`.
    pub site_name: Option<String>,
    /// Meta description.
    pub description: Option<String>,
    /// Absolute canonical URL.
    pub canonical_link: Option<String>,
    /// Meta keywords, in page order.
    pub keywords: Vec<String>,
    /// Tags from `article:tag` and tag links.
    pub tags: BTreeSet<String>,
    /// Every named meta tag, `name -> content` (first occurrence wins).
    pub data: BTreeMap<String, String>,
    /// `og:type`, lowercase.
    pub page_type: Option<String>,
}

/// Images found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    /// Main image: the meta image when present, else the first content image.
    pub top_image: Option<String>,
    /// Image declared in metadata (`og:image` and friends).
    pub meta_image: Option<String>,
    /// Every image URL, absolute, in document order, without duplicates.
    pub images: Vec<String>,
    /// Favicon URL.
    pub favicon: Option<String>,
}

/// An embedded video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    /// Host name of the video provider (e.g. `youtube`).
    pub provider: String,
    /// Embed URL.
    pub src: String,
    /// Declared width, if any.
    pub width: Option<u32>,
    /// Declared height, if any.
    pub height: Option<u32>,
}

/// Extraction collaborator driven by [`crate::Article::parse`].
///
/// All methods are read-only over the trees they are given, except that
/// [`ContentExtractor::set_language`] switches the language used by
/// language-sensitive steps (content scoring).
pub trait ContentExtractor: Send + Sync {
    /// Switch the active language (ISO 639-1).
    fn set_language(&mut self, language: &str);

    /// Active language.
    fn language(&self) -> &str;

    /// Article title; empty when none is found.
    fn title(&self, doc: &Document) -> String;

    /// Author names in page order, deduplicated.
    fn authors(&self, doc: &Document) -> Vec<String>;

    /// Page metadata; relative links resolve against `url`.
    fn metadata(&self, url: &str, doc: &Document) -> PageMetadata;

    /// Publish date from the URL or the document.
    fn publish_date(&self, url: &str, doc: &Document) -> Option<DateTime<Utc>>;

    /// Node most likely to hold the article body.
    fn best_node<'a>(&self, doc: &'a Document) -> Option<Selection<'a>>;

    /// Detached copy of `node` extended with relevant preceding siblings.
    fn complemented_node(&self, node: &Selection) -> Document;

    /// Videos embedded in `node` (or the whole document without one).
    fn videos(&self, doc: &Document, node: Option<&Selection>) -> Vec<Video>;

    /// Images of the page, scoped to `node` for content images.
    fn images(&self, url: &str, doc: &Document, node: Option<&Selection>) -> ImageSet;
}

/// Heuristic extractor used when no other is configured.
#[derive(Debug, Clone)]
pub struct DefaultExtractor {
    language: String,
}

impl DefaultExtractor {
    /// Extractor for `language` (falls back to English stopwords when unsupported).
    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
        }
    }
}

impl Default for DefaultExtractor {
    fn default() -> Self {
        Self::new("en")
    }
}

impl ContentExtractor for DefaultExtractor {
    fn set_language(&mut self, language: &str) {
        self.language = language.to_ascii_lowercase();
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn title(&self, doc: &Document) -> String {
        title::extract_title(doc)
    }

    fn authors(&self, doc: &Document) -> Vec<String> {
        authors::extract_authors(doc)
    }

    fn metadata(&self, url: &str, doc: &Document) -> PageMetadata {
        metadata::extract_metadata(url, doc)
    }

    fn publish_date(&self, url: &str, doc: &Document) -> Option<DateTime<Utc>> {
        pubdate::extract_publish_date(url, doc)
    }

    fn best_node<'a>(&self, doc: &'a Document) -> Option<Selection<'a>> {
        content::best_node(doc, stopwords::for_language(&self.language))
    }

    fn complemented_node(&self, node: &Selection) -> Document {
        content::complemented_node(node, stopwords::for_language(&self.language))
    }

    fn videos(&self, doc: &Document, node: Option<&Selection>) -> Vec<Video> {
        media::extract_videos(doc, node)
    }

    fn images(&self, url: &str, doc: &Document, node: Option<&Selection>) -> ImageSet {
        media::extract_images(url, doc, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_switch() {
        let mut extractor = DefaultExtractor::default();
        assert_eq!(extractor.language(), "en");
        extractor.set_language("DE");
        assert_eq!(extractor.language(), "de");
    }

    #[test]
    fn usable_as_trait_object() {
        let extractor: Box<dyn ContentExtractor> = Box::new(DefaultExtractor::new("en"));
        let doc = Document::from("<html><head><title>Storm hits the coast tonight</title></head></html>");
        assert_eq!(extractor.title(&doc), "Storm hits the coast tonight");
    }
}
