//! Error types for rs-newspaper.
//!
//! Only usage errors surface here. Data failures during acquisition
//! (bad status, transport errors, bot protection) are recorded on the
//! article as `download_state` / `download_exception_msg` instead.

/// Error type for article operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The article URL (or the source URL derived from it) is empty or malformed.
    #[error("input url bad format: {0:?}")]
    InvalidUrl(String),

    /// `parse()`/`nlp()` called before `download()`.
    #[error("You must `download()` an article first!")]
    NotDownloaded,

    /// `parse()`/`nlp()` called after `download()` failed.
    #[error("Article `download()` failed with {message} on URL {url}")]
    DownloadFailed {
        /// Recorded `download_exception_msg`.
        message: String,
        /// URL of the failed download.
        url: String,
    },

    /// `nlp()`, `is_valid_body()` or `to_json()` called before `parse()`.
    #[error("You must `parse()` an article first!")]
    NotParsed,

    /// `download()` called on an article that already finished downloading.
    #[error("Article download already finished for URL {0}")]
    AlreadyDownloaded(String),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for article operations.
pub type Result<T> = std::result::Result<T, Error>;
