//! The article record and its download → parse → nlp lifecycle.
//!
//! An [`Article`] is built once per URL, then driven through
//! [`Article::download`], [`Article::parse`] and optionally
//! [`Article::nlp`]. Acquisition failures are recorded on the record
//! ([`Article::download_state`], [`Article::download_exception_msg`]);
//! only out-of-order calls return an [`Error`].

mod download;
mod json;
mod parse;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use url::Url;

use crate::dom::{self, Document, NodeId, Selection};
use crate::error::{Error, Result};
use crate::extractors::{ContentExtractor, DefaultExtractor};
use crate::network::{HttpTransport, Transport};
use crate::options::Options;
use crate::url_utils;
use crate::validity::{self, BodySignals};

pub use download::DownloadRequest;
pub use json::ArticleJson;

/// Where an article is in its acquisition lifecycle.
///
/// Moves from `NotStarted` to one of the two terminal states, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DownloadState {
    /// `download()` has not run yet.
    #[default]
    NotStarted,
    /// The fetch failed; see [`Article::download_exception_msg`].
    FailedResponse,
    /// Content is available in [`Article::html`].
    Success,
}

/// One web document and everything extracted from it.
pub struct Article {
    original_url: String,
    url: String,
    source_url: String,
    read_more_link: String,

    title: String,
    text: String,
    text_cleaned: String,
    summary: String,
    html: String,

    doc: Option<Document>,
    clean_doc: Option<Document>,
    top_node: Option<NodeId>,
    clean_top_node: Option<NodeId>,

    download_state: DownloadState,
    download_exception_msg: Option<String>,
    history: Vec<String>,
    is_parsed: bool,
    link_hash: Option<String>,
    meta_type: Option<String>,

    options: Arc<Options>,
    transport: Arc<dyn Transport>,
    extractor: Box<dyn ContentExtractor>,

    /// Simplified HTML of the article body.
    pub article_html: String,
    /// Author names.
    pub authors: Vec<String>,
    /// Publish date.
    pub publish_date: Option<DateTime<Utc>>,
    /// Keywords from [`Article::nlp`], best first.
    pub keywords: Vec<String>,
    /// Scores of [`Article::keywords`].
    pub keyword_scores: BTreeMap<String, f64>,
    /// Keywords declared in `<meta name="keywords">`.
    pub meta_keywords: Vec<String>,
    /// Tags declared by the page.
    pub tags: BTreeSet<String>,
    /// URL of the image that best represents the article.
    pub top_image: String,
    /// Image declared in metadata.
    pub meta_img: String,
    /// All image URLs.
    pub images: Vec<String>,
    /// Embedded video URLs.
    pub movies: Vec<String>,
    /// Outbound links inside the article body.
    pub links: Vec<String>,
    /// Meta description.
    pub meta_description: String,
    /// Declared language, when it is a supported one.
    pub meta_lang: String,
    /// `og:site_name`.
    pub meta_site_name: String,
    /// Favicon URL.
    pub meta_favicon: String,
    /// Canonical URL.
    pub canonical_link: String,
    /// Raw meta tags.
    pub meta_data: BTreeMap<String, String>,
    /// Free-form data attached by the caller.
    pub additional_data: HashMap<String, serde_json::Value>,
}

impl fmt::Debug for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Article")
            .field("url", &self.url)
            .field("original_url", &self.original_url)
            .field("title", &self.title)
            .field("download_state", &self.download_state)
            .field("download_exception_msg", &self.download_exception_msg)
            .field("is_parsed", &self.is_parsed)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Article`].
///
/// # Example
///
/// ```rust
/// use rs_newspaper::ArticleBuilder;
///
/// let article = ArticleBuilder::new("/news/1")
///     .source_url("https://x.test")
///     .title("Fallback title")
///     .build()?;
/// assert_eq!(article.url(), "https://x.test/news/1");
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
pub struct ArticleBuilder {
    url: String,
    title: String,
    source_url: String,
    read_more_link: String,
    options: Option<Arc<Options>>,
    transport: Option<Arc<dyn Transport>>,
    extractor: Option<Box<dyn ContentExtractor>>,
}

impl ArticleBuilder {
    /// Start building an article for `url`.
    ///
    /// Without a source URL, an absolute filesystem path is read as a `file://` URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            source_url: String::new(),
            read_more_link: String::new(),
            options: None,
            transport: None,
            extractor: None,
        }
    }

    /// Title used when none can be extracted.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Home page of the site the article belongs to; derived from the URL when unset.
    #[must_use]
    pub fn source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = source_url.into();
        self
    }

    /// CSS selector for a "read more" link leading to the full article.
    ///
    /// Alternatives are comma-separated; the first match with an `href` wins.
    #[must_use]
    pub fn read_more_link(mut self, selector: impl Into<String>) -> Self {
        self.read_more_link = selector.into();
        self
    }

    /// Shared configuration.
    #[must_use]
    pub fn options(mut self, options: Arc<Options>) -> Self {
        self.options = Some(options);
        self
    }

    /// Transport used for every fetch of this article.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Extraction collaborator.
    #[must_use]
    pub fn extractor(mut self, extractor: Box<dyn ContentExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Resolve the URLs and build the article.
    ///
    /// Fails with [`Error::InvalidUrl`] when the URL is empty or cannot be
    /// made absolute against the source URL.
    pub fn build(self) -> Result<Article> {
        let options = self.options.unwrap_or_default();

        let raw = self.url.trim();
        if raw.is_empty() {
            return Err(Error::InvalidUrl(self.url));
        }
        let has_source = !self.source_url.trim().is_empty();
        let raw = if !has_source && url_utils::get_scheme(raw).is_none() && Path::new(raw).is_absolute() {
            Url::from_file_path(raw).map_or_else(|()| raw.to_string(), String::from)
        } else {
            raw.to_string()
        };

        let source_url = if !has_source {
            let scheme = url_utils::get_scheme(&raw).unwrap_or_else(|| "http".to_string());
            let domain = url_utils::get_domain(&raw).unwrap_or_default();
            format!("{scheme}://{domain}")
        } else {
            self.source_url.trim().to_string()
        };

        let url = url_utils::prepare_url(&raw, Some(&source_url));
        if url.is_empty() {
            return Err(Error::InvalidUrl(raw));
        }

        let mut extractor = self
            .extractor
            .unwrap_or_else(|| Box::new(DefaultExtractor::new(&options.language)));
        extractor.set_language(&options.language);

        let mut article = Article {
            original_url: url.clone(),
            url,
            source_url,
            read_more_link: self.read_more_link,
            title: String::new(),
            text: String::new(),
            summary: String::new(),
            html: String::new(),
            doc: None,
            clean_doc: None,
            top_node: None,
            clean_top_node: None,
            download_state: DownloadState::NotStarted,
            download_exception_msg: None,
            history: Vec::new(),
            is_parsed: false,
            link_hash: None,
            meta_type: None,
            options,
            transport: self.transport.unwrap_or_else(HttpTransport::new_arc),
            extractor,
            text_cleaned: String::new(),
            article_html: String::new(),
            authors: Vec::new(),
            publish_date: None,
            keywords: Vec::new(),
            keyword_scores: BTreeMap::new(),
            meta_keywords: Vec::new(),
            tags: BTreeSet::new(),
            top_image: String::new(),
            meta_img: String::new(),
            images: Vec::new(),
            movies: Vec::new(),
            links: Vec::new(),
            meta_description: String::new(),
            meta_lang: String::new(),
            meta_site_name: String::new(),
            meta_favicon: String::new(),
            canonical_link: String::new(),
            meta_data: BTreeMap::new(),
            additional_data: HashMap::new(),
        };
        article.set_title(&self.title);
        Ok(article)
    }
}

impl Article {
    /// Article with default options, transport and extractor.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        ArticleBuilder::new(url).build()
    }

    /// Download, parse and run nlp in one go.
    pub fn build(&mut self) -> Result<&mut Self> {
        self.download()?;
        self.parse()?;
        self.nlp()
    }

    // === Identity ===

    /// URL as given at construction, after normalization. Never changes.
    #[must_use]
    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    /// Current URL; differs from the original after read-more or meta-refresh indirection.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Home page of the site.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Read-more selector.
    #[must_use]
    pub fn read_more_link(&self) -> &str {
        &self.read_more_link
    }

    /// Configuration in use.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Language used for extraction and nlp (after metadata detection).
    #[must_use]
    pub fn language(&self) -> &str {
        self.extractor.language()
    }

    // === Bounded fields ===

    /// Title, at most `max_title` characters.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title, truncating to `max_title` characters.
    pub fn set_title(&mut self, title: &str) {
        self.title = truncate_chars(title, self.options.max_title);
    }

    /// Body text, at most `max_text` characters.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the body text, truncating to `max_text` characters.
    pub fn set_text(&mut self, text: &str) {
        self.text = truncate_chars(text, self.options.max_text);
    }

    /// Plain text of the best node in the cleaned tree, at most `max_text`
    /// characters.
    #[must_use]
    pub fn text_cleaned(&self) -> &str {
        &self.text_cleaned
    }

    /// Summary from [`Article::nlp`], at most `max_summary` characters.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Replace the summary, truncating to `max_summary` characters.
    pub fn set_summary(&mut self, summary: &str) {
        self.summary = truncate_chars(summary, self.options.max_summary);
    }

    /// Raw downloaded HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Store downloaded content; this is what marks the download successful.
    pub(crate) fn set_html(&mut self, html: String) {
        self.html = html;
        self.download_state = DownloadState::Success;
    }

    // === State ===

    /// Acquisition state.
    #[must_use]
    pub fn download_state(&self) -> DownloadState {
        self.download_state
    }

    /// Why the download failed, when it did.
    #[must_use]
    pub fn download_exception_msg(&self) -> Option<&str> {
        self.download_exception_msg.as_deref()
    }

    /// URLs of the redirects traversed while downloading.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Whether `parse()` has run.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.is_parsed
    }

    /// Identity hash computed during `parse()`.
    #[must_use]
    pub fn link_hash(&self) -> Option<&str> {
        self.link_hash.as_deref()
    }

    /// Page type (`og:type`) reported by the metadata extractor.
    #[must_use]
    pub fn meta_type(&self) -> Option<&str> {
        self.meta_type.as_deref()
    }

    // === Trees ===

    /// Parsed document, as downloaded.
    #[must_use]
    pub fn doc(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// Independent copy of [`Article::doc`] after boilerplate cleaning.
    #[must_use]
    pub fn clean_doc(&self) -> Option<&Document> {
        self.clean_doc.as_ref()
    }

    /// Best-content node in [`Article::doc`].
    #[must_use]
    pub fn top_node(&self) -> Option<Selection<'_>> {
        dom::find_node(self.doc.as_ref()?, self.top_node?)
    }

    /// Best-content node in [`Article::clean_doc`].
    #[must_use]
    pub fn clean_top_node(&self) -> Option<Selection<'_>> {
        dom::find_node(self.clean_doc.as_ref()?, self.clean_top_node?)
    }

    // === Aliases and checks ===

    /// Same as [`Article::images`].
    #[must_use]
    pub fn imgs(&self) -> &[String] {
        &self.images
    }

    /// Same as [`Article::top_image`].
    #[must_use]
    pub fn top_img(&self) -> &str {
        &self.top_image
    }

    /// Whether the URL is shaped like a news article URL.
    #[must_use]
    pub fn is_valid_url(&self) -> bool {
        url_utils::valid_url(&self.url)
    }

    /// Whether the URL points at a media-heavy page.
    #[must_use]
    pub fn is_media_news(&self) -> bool {
        validity::is_media_url(&self.url)
    }

    /// Whether the parsed page qualifies as an article.
    pub fn is_valid_body(&self) -> Result<bool> {
        self.ensure_parsed()?;
        let signals = BodySignals {
            url: &self.url,
            meta_type: self.meta_type.as_deref(),
            title: &self.title,
            text: &self.text,
            html: &self.html,
        };
        Ok(validity::is_valid_body(&signals, &self.options))
    }

    // === Preconditions ===

    fn ensure_downloaded(&self) -> Result<()> {
        match self.download_state {
            DownloadState::Success => Ok(()),
            DownloadState::NotStarted => Err(Error::NotDownloaded),
            DownloadState::FailedResponse => Err(Error::DownloadFailed {
                message: self.download_exception_msg.clone().unwrap_or_default(),
                url: self.url.clone(),
            }),
        }
    }

    fn ensure_parsed(&self) -> Result<()> {
        if self.is_parsed {
            Ok(())
        } else {
            Err(Error::NotParsed)
        }
    }
}

/// First `max` characters of `s`.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
