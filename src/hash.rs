//! Identity hashing for downstream deduplication.

use sha2::{Digest, Sha256};

/// Stable identity hash of a document.
///
/// Hashes the URL and, when available, the content; the two inputs are
/// separated by a NUL byte so `("ab", "c")` and `("a", "bc")` differ.
#[must_use]
pub fn link_hash(url: &str, content: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    if let Some(content) = content {
        hasher.update([0u8]);
        hasher.update(content.as_bytes());
    }
    hex::encode(hasher.finalize())
}
