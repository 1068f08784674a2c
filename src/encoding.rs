//! Decoding of fetched document bytes into UTF-8 text.
//!
//! The charset is chosen in this order: byte-order mark, the HTTP
//! `Content-Type` header, an in-document `<meta>` declaration, then UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// `charset=` parameter of a `Content-Type` value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Bytes of the document head inspected for a `<meta>` declaration.
const SNIFF_LEN: usize = 2048;

/// Charset named by a `Content-Type` header value, if it is a known label.
#[must_use]
pub fn encoding_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Charset declared by a `<meta>` tag near the start of the document.
#[must_use]
pub fn encoding_from_meta(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Pick the encoding for a document body.
#[must_use]
pub fn detect_encoding(html: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    content_type
        .and_then(encoding_from_content_type)
        .or_else(|| encoding_from_meta(html))
        .unwrap_or(UTF_8)
}

/// Decode a fetched body, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn decode_body(html: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(html, content_type);
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}

/// Decode bytes with no transport metadata (files, caller-supplied content).
///
/// # Examples
///
/// ```
/// use rs_newspaper::encoding::transcode_to_utf8;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    decode_body(html, None)
}
