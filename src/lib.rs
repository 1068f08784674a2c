//! # rs-newspaper
//!
//! Single-article acquisition and extraction for news pages.
//!
//! An [`Article`] downloads one page (over HTTP or from disk), resolves a
//! meta-refresh or "read more" indirection, recognizes anti-bot protection
//! pages, and extracts title, authors, dates, metadata, body text, images,
//! videos and links. An optional nlp pass adds keywords and a summary.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_newspaper::Article;
//!
//! let html = r#"<html><head><title>Council approves budget</title></head>
//! <body><article>
//!   <p>The city council approved the new budget on Monday after a long debate in the chamber.</p>
//!   <p>It was the first time in years that the vote was unanimous, and the mayor thanked the members.</p>
//! </article></body></html>"#;
//!
//! let mut article = Article::new("https://news.example.com/2024/03/01/budget")?;
//! article.download_html(html)?.parse()?;
//!
//! assert_eq!(article.title(), "Council approves budget");
//! assert!(article.text().contains("unanimous"));
//! # Ok::<(), rs_newspaper::Error>(())
//! ```
//!
//! ## Failure model
//!
//! Data failures (HTTP errors, protection pages, unreadable files) never
//! return an error: they are recorded in [`Article::download_state`] and
//! [`Article::download_exception_msg`]. Calling steps out of order does.

mod error;
mod options;

/// The article record and its pipeline.
pub mod article;

/// Boilerplate removal.
pub mod cleaner;

/// DOM operations over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Title, author, metadata, date, content and media extraction.
pub mod extractors;

/// Body text and HTML formatting.
pub mod formatter;

/// Identity hashing.
pub mod hash;

/// HTTP transport.
pub mod network;

/// Keyword ranking and summarization.
pub mod nlp;

/// Anti-bot protection detection.
pub mod protection;

/// Stopword lists.
pub mod stopwords;

/// URL utilities for validation, resolution, and normalization.
pub mod url_utils;

/// Article body validity heuristics.
pub mod validity;

// Public API - re-exports
pub use article::{Article, ArticleBuilder, ArticleJson, DownloadRequest, DownloadState};
pub use error::{Error, Result};
pub use extractors::{ContentExtractor, DefaultExtractor, LinkExtractor};
pub use network::{FetchResponse, HttpTransport, Transport, TransportError};
pub use options::{Options, RequestOptions, DEFAULT_JSON_FIELDS};
