//! HTTP transport used by the acquisition pipeline.
//!
//! [`Transport`] is the seam between an article and the network. The
//! default [`HttpTransport`] wraps a blocking `reqwest` client; tests and
//! callers with their own fetch layer plug in other implementations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::encoding;
use crate::options::RequestOptions;

/// A completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResponse {
    /// Decoded response body.
    pub body: String,
    /// Final HTTP status code.
    pub status: u16,
    /// URLs of the redirect responses traversed before the final one.
    pub history: Vec<String>,
}

/// Transport-level failure (no HTTP response was obtained).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be built from the request options.
    #[error("invalid request configuration: {0}")]
    Config(String),

    /// Connection, TLS, timeout or body read failure.
    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Fetches raw documents.
///
/// Implementations must be shareable across threads: one transport is
/// typically shared by many articles processed in parallel.
pub trait Transport: Send + Sync {
    /// Issue a GET and return the response regardless of its status code.
    fn fetch(&self, url: &str, options: &RequestOptions) -> Result<FetchResponse, TransportError>;

    /// Fetch a body, treating any failure or error status as `None`.
    fn fetch_simple(&self, url: &str, options: &RequestOptions) -> Option<String> {
        match self.fetch(url, options) {
            Ok(resp) if resp.status < 400 => Some(resp.body),
            Ok(resp) => {
                debug!(url, status = resp.status, "simple fetch got error status");
                None
            }
            Err(err) => {
                debug!(url, error = %err, "simple fetch failed");
                None
            }
        }
    }
}

/// Blocking HTTP transport over `reqwest`.
///
/// One client is built lazily per distinct [`RequestOptions`] and reused, so
/// articles sharing a transport each get their own user agent, headers,
/// timeout and proxy.
#[derive(Debug, Default)]
pub struct HttpTransport {
    clients: Mutex<HashMap<RequestOptions, Client>>,
}

impl HttpTransport {
    /// Create a transport; clients are built on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New transport behind an `Arc`, ready to hand to several articles.
    #[must_use]
    pub fn new_arc() -> Arc<dyn Transport> {
        Arc::new(Self::new())
    }

    fn client(&self, options: &RequestOptions) -> Result<Client, TransportError> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| TransportError::Config("client lock poisoned".to_string()))?;
        if let Some(client) = clients.get(options) {
            return Ok(client.clone());
        }
        debug!(user_agent = %options.user_agent, "building http client");
        let client = build_client(options)?;
        clients.insert(options.clone(), client.clone());
        Ok(client)
    }

    #[cfg(test)]
    fn client_count(&self) -> usize {
        self.clients.lock().map_or(0, |clients| clients.len())
    }
}

/// Build a blocking client honouring `options`.
pub fn build_client(options: &RequestOptions) -> Result<Client, TransportError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &options.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::Config(format!("header {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::Config(format!("header value {value:?}: {e}")))?;
        headers.insert(name, value);
    }

    let mut builder = Client::builder()
        .user_agent(options.user_agent.clone())
        .default_headers(headers)
        .timeout(options.timeout)
        // Redirects are followed by hand so the chain can be recorded.
        .redirect(Policy::none())
        .cookie_store(true)
        .danger_accept_invalid_certs(!options.verify_tls);

    if let Some(proxy) = &options.proxy {
        let proxy = reqwest::Proxy::all(proxy.as_str())
            .map_err(|e| TransportError::Config(format!("proxy {proxy}: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| TransportError::Config(e.to_string()))
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str, options: &RequestOptions) -> Result<FetchResponse, TransportError> {
        let client = self.client(options)?;
        let mut history = Vec::new();
        let mut current = url.to_string();

        loop {
            let response = client.get(&current).send()?;
            let status = response.status();

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|loc| response.url().join(loc).ok());

            if status.is_redirection() && options.allow_redirects {
                if let Some(next) = location {
                    if history.len() >= options.max_redirects {
                        return Err(TransportError::Request(format!(
                            "Exceeded {} redirects for url {url}",
                            options.max_redirects
                        )));
                    }
                    debug!(from = %current, to = %next, status = status.as_u16(), "redirect");
                    history.push(std::mem::replace(&mut current, next.to_string()));
                    continue;
                }
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes()?;

            debug!(url = %current, status = status.as_u16(), bytes = bytes.len(), "fetched");

            return Ok(FetchResponse {
                body: encoding::decode_body(&bytes, content_type.as_deref()),
                status: status.as_u16(),
                history,
            });
        }
    }
}
