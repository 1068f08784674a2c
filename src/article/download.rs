//! Acquisition: fetch raw content and resolve indirection.
//!
//! Failures are recorded on the article, never returned: batch callers keep
//! going and inspect `download_state` afterwards.

use tracing::{debug, info, warn};

use super::{Article, DownloadState};
use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::protection;
use crate::url_utils;

/// Meta-refresh hops followed before the content is taken as final.
const MAX_REFRESH_HOPS: usize = 1;

/// Parameters of one acquisition.
///
/// The default fetches the article URL and follows every configured
/// indirection.
///
/// # Example
///
/// ```rust
/// use rs_newspaper::{Article, DownloadRequest, DownloadState};
///
/// let mut article = Article::new("https://x.test/a")?;
/// article.download_with(DownloadRequest {
///     html: Some("<html><body><p>hi</p></body></html>".to_string()),
///     ignore_read_more: true,
///     ..DownloadRequest::default()
/// })?;
/// assert_eq!(article.download_state(), DownloadState::Success);
/// # Ok::<(), rs_newspaper::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DownloadRequest {
    /// Content to use instead of fetching.
    pub html: Option<String>,
    /// Title that overrides the constructor title.
    pub title: Option<String>,
    /// Skip the read-more hop.
    pub ignore_read_more: bool,
}

impl Article {
    /// Fetch the article URL (network or `file://`).
    ///
    /// Returns an error only when the article was already downloaded;
    /// fetch failures are recorded in [`Article::download_state`] and
    /// [`Article::download_exception_msg`].
    pub fn download(&mut self) -> Result<&mut Self> {
        self.download_with(DownloadRequest::default())
    }

    /// Use `html` as the downloaded content.
    pub fn download_html(&mut self, html: impl Into<String>) -> Result<&mut Self> {
        self.download_with(DownloadRequest {
            html: Some(html.into()),
            ..DownloadRequest::default()
        })
    }

    /// Use raw bytes as the downloaded content, detecting their charset.
    pub fn download_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.download_html(encoding::transcode_to_utf8(bytes))
    }

    /// Run one acquisition.
    pub fn download_with(&mut self, request: DownloadRequest) -> Result<&mut Self> {
        if self.download_state != DownloadState::NotStarted {
            return Err(Error::AlreadyDownloaded(self.url.clone()));
        }

        let content = match request.html {
            Some(html) => html,
            None => match self.fetch_document() {
                Some(body) => body,
                None => return Ok(self),
            },
        };

        let content = self.resolve_meta_refresh(content, 0);
        let content = if request.ignore_read_more {
            content
        } else {
            self.follow_read_more(content)
        };

        if let Some(title) = request.title {
            self.set_title(&title);
        }
        debug!(url = %self.url, bytes = content.len(), "download complete");
        self.set_html(content);
        Ok(self)
    }

    /// Fetch the current URL; `None` after recording a failure.
    fn fetch_document(&mut self) -> Option<String> {
        if url_utils::get_scheme(&self.url).as_deref() == Some("file") {
            return self.read_local_file();
        }
        match self.fetch_http(&self.url.clone()) {
            Ok(body) => Some(body),
            Err(msg) => {
                self.fail(msg);
                None
            }
        }
    }

    fn read_local_file(&mut self) -> Option<String> {
        let path = url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.to_file_path().ok());
        let Some(path) = path else {
            self.fail(format!("Invalid file url {}", self.url));
            return None;
        };
        match std::fs::read(&path) {
            Ok(bytes) => Some(encoding::transcode_to_utf8(&bytes)),
            Err(err) => {
                self.fail(err.to_string());
                None
            }
        }
    }

    /// GET `url` through the transport, recording the redirect chain.
    ///
    /// The error is the message to record for this failure.
    fn fetch_http(&mut self, url: &str) -> std::result::Result<String, String> {
        let response = self
            .transport
            .fetch(url, &self.options.request)
            .map_err(|err| err.to_string())?;
        self.history = response.history;
        if response.status >= 400 {
            return Err(protection::failure_message(&response.body, response.status, url));
        }
        Ok(response.body)
    }

    /// Replace `content` with the target of its meta-refresh, at most once.
    fn resolve_meta_refresh(&mut self, content: String, hop: usize) -> String {
        if !self.options.follow_meta_refresh || hop >= MAX_REFRESH_HOPS {
            return content;
        }
        let Some(target) = dom::extract_meta_refresh(&content) else {
            return content;
        };
        let Some(target) = url_utils::urljoin_if_valid(&self.url, &target) else {
            warn!(url = %self.url, target = %target, "unresolvable meta refresh target");
            return content;
        };

        match self.transport.fetch_simple(&target, &self.options.request) {
            Some(body) => {
                info!(from = %self.url, to = %target, "following meta refresh");
                self.url.clone_from(&target);
                self.history.push(target);
                self.resolve_meta_refresh(body, hop + 1)
            }
            None => {
                warn!(url = %self.url, target = %target, "meta refresh target unavailable, keeping original");
                content
            }
        }
    }

    /// Swap `content` for the page behind the first read-more link, if any.
    fn follow_read_more(&mut self, content: String) -> String {
        let selector = self.read_more_link.trim();
        if selector.is_empty() {
            return content;
        }
        let Some(doc) = dom::parse(&content) else {
            return content;
        };
        let Some(matches) = doc.try_select(selector) else {
            warn!(selector, "invalid read-more selector ignored");
            return content;
        };
        let href = matches
            .nodes()
            .iter()
            .find_map(|n| dom::non_empty_attribute(&dom::Selection::from(*n), "href"));
        let Some(href) = href else {
            return content;
        };

        let target = url_utils::prepare_url(&href, Some(&self.url));
        if target.is_empty() {
            warn!(href = %href, "unresolvable read-more link");
            return content;
        }
        match self.fetch_http(&target) {
            Ok(body) => {
                info!(from = %self.url, to = %target, "following read-more link");
                self.url = target;
                body
            }
            Err(msg) => {
                warn!(url = %target, error = %msg, "read-more fetch failed, keeping original");
                content
            }
        }
    }

    fn fail(&mut self, msg: String) {
        warn!(url = %self.url, error = %msg, "download failed");
        self.download_exception_msg = Some(msg);
        self.download_state = DownloadState::FailedResponse;
    }
}
