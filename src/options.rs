//! Configuration options for downloading, parsing and analysing articles.
//!
//! `Options` is built once and shared read-only between articles through an
//! `Arc`. Nothing in the crate mutates it after construction.

use std::collections::BTreeMap;
use std::time::Duration;

/// Fields emitted by [`crate::Article::to_json`] unless overridden.
pub const DEFAULT_JSON_FIELDS: &[&str] = &[
    "url",
    "read_more_link",
    "language",
    "title",
    "top_image",
    "meta_img",
    "images",
    "movies",
    "keywords",
    "keyword_scores",
    "meta_keywords",
    "tags",
    "authors",
    "publish_date",
    "summary",
    "meta_description",
    "meta_lang",
    "meta_favicon",
    "meta_site_name",
    "canonical_link",
    "text",
];

/// Browser-like user agent used when none is configured.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Options handed to the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestOptions {
    /// `User-Agent` header value.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Whole-request timeout. A hung fetch is only bounded by this value.
    ///
    /// Default: 7 seconds
    pub timeout: Duration,

    /// Extra request headers.
    ///
    /// Default: empty
    pub headers: BTreeMap<String, String>,

    /// Proxy URL applied to all schemes.
    ///
    /// Default: `None`
    pub proxy: Option<String>,

    /// Follow HTTP redirects.
    ///
    /// Default: `true`
    pub allow_redirects: bool,

    /// Redirect limit when `allow_redirects` is set.
    ///
    /// Default: `10`
    pub max_redirects: usize,

    /// Verify TLS certificates.
    ///
    /// Default: `true`
    pub verify_tls: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(7),
            headers: BTreeMap::new(),
            proxy: None,
            allow_redirects: true,
            max_redirects: 10,
            verify_tls: true,
        }
    }
}

/// Configuration for an article's download, parse and nlp steps.
///
/// All fields are public; use struct-update syntax over `Options::default()`.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::Options;
///
/// let options = Options {
///     follow_meta_refresh: true,
///     max_keywords: 10,
///     ..Options::default()
/// };
/// assert_eq!(options.language, "en");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Language (ISO 639-1) used for stopwords and content scoring.
    ///
    /// Default: `"en"`
    pub language: String,

    /// Switch to the language declared in the page metadata when it is supported.
    ///
    /// Default: `true`
    pub use_meta_language: bool,

    /// Follow one `<meta http-equiv="refresh">` redirect after download.
    ///
    /// Default: `false`
    pub follow_meta_refresh: bool,

    /// Maximum title length (characters).
    ///
    /// Default: `200`
    pub max_title: usize,

    /// Maximum body text length (characters).
    ///
    /// Default: `100000`
    pub max_text: usize,

    /// Maximum number of keywords (nlp and meta keywords).
    ///
    /// Default: `35`
    pub max_keywords: usize,

    /// Maximum number of authors.
    ///
    /// Default: `10`
    pub max_authors: usize,

    /// Maximum summary length (characters).
    ///
    /// Default: `5000`
    pub max_summary: usize,

    /// Maximum number of sentences in the summary.
    ///
    /// Default: `5`
    pub max_summary_sent: usize,

    /// Minimum number of words for a valid article body.
    ///
    /// Default: `300`
    pub min_word_count: usize,

    /// Minimum number of sentences for a valid article body.
    ///
    /// Default: `7`
    pub min_sent_count: usize,

    /// HTTP transport settings.
    pub request: RequestOptions,

    /// Whitelist of fields emitted by `to_json`.
    ///
    /// Default: [`DEFAULT_JSON_FIELDS`]
    pub json_fields: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            use_meta_language: true,
            follow_meta_refresh: false,
            max_title: 200,
            max_text: 100_000,
            max_keywords: 35,
            max_authors: 10,
            max_summary: 5_000,
            max_summary_sent: 5,
            min_word_count: 300,
            min_sent_count: 7,
            request: RequestOptions::default(),
            json_fields: DEFAULT_JSON_FIELDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Options {
    /// Default options with an explicit language.
    ///
    /// An explicit language disables switching to the page's declared language.
    #[must_use]
    pub fn with_language(language: &str) -> Self {
        Self {
            language: language.to_lowercase(),
            use_meta_language: false,
            ..Self::default()
        }
    }
}
