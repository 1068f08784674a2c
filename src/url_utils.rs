//! URL utilities: scheme/domain extraction, normalization against a base,
//! link resolution and the article-URL shape check.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `/2024/05/12/`, `/2024-05-12/`, `/2024/05/` style date segments.
#[allow(clippy::expect_used)]
static URL_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[/_-])(19|20)\d{2}[/_-]?(?:0?[1-9]|1[0-2])[/_-]?(?:(?:0?[1-9]|[12]\d|3[01])[/_-]?)?(?:$|[/_.-])")
        .expect("valid regex")
});

/// Extensions that can never be an article page.
const BAD_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "ico", "bmp", "mp3", "mp4", "avi", "mov",
    "wav", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "zip", "gz", "tar", "exe", "css", "js",
    "json", "xml", "rss",
];

/// Path segments that mark non-article pages.
const BAD_CHUNKS: &[&str] = &[
    "careers", "contact", "about", "faq", "terms", "privacy", "advert", "preferences",
    "feedback", "info", "browse", "howto", "account", "subscribe", "donate", "shop", "admin",
    "login", "signup", "search", "tag", "tags", "category", "author",
];

/// Path segments that mark article-like pages.
const GOOD_CHUNKS: &[&str] = &[
    "story", "article", "feature", "featured", "slides", "slideshow", "gallery", "news",
    "video", "media", "v", "radio", "press", "blog", "post",
];

/// Scheme of `url_str`, lowercase, if it parses as an absolute URL.
#[must_use]
pub fn get_scheme(url_str: &str) -> Option<String> {
    Url::parse(url_str.trim()).ok().map(|u| u.scheme().to_string())
}

/// Network location (`host[:port]`) of `url_str`.
#[must_use]
pub fn get_domain(url_str: &str) -> Option<String> {
    let url = Url::parse(url_str.trim()).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Resolve `href` against `base`. `None` when either side fails to parse.
///
/// # Examples
/// ```
/// use rs_newspaper::url_utils::urljoin_if_valid;
///
/// assert_eq!(
///     urljoin_if_valid("https://x.test/a", "/p/1").as_deref(),
///     Some("https://x.test/p/1")
/// );
/// assert_eq!(urljoin_if_valid("not a url", "/p/1"), None);
/// ```
#[must_use]
pub fn urljoin_if_valid(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base.trim()).ok()?;
    base.join(href.trim()).ok().map(String::from)
}

/// Normalize `url_str` to an absolute URL relative to `source_url`.
///
/// Aggregator links (`?url=...` on a foreign domain) are unwrapped to their
/// target. Returns an empty string when the URL cannot be resolved.
#[must_use]
pub fn prepare_url(url_str: &str, source_url: Option<&str>) -> String {
    let url_str = url_str.trim();
    let Some(source_url) = source_url.filter(|s| !s.trim().is_empty()) else {
        return url_str.to_string();
    };

    let Some(joined) = urljoin_if_valid(source_url, url_str) else {
        // Absolute input with an unusable base still resolves on its own.
        return Url::parse(url_str).map(String::from).unwrap_or_default();
    };

    let source_domain = get_domain(source_url).unwrap_or_default();
    redirect_back(&joined, &source_domain)
}

/// Unwrap `?url=` redirectors that point away from the source domain.
fn redirect_back(url_str: &str, source_domain: &str) -> String {
    let Ok(url) = Url::parse(url_str) else {
        return url_str.to_string();
    };
    let domain = get_domain(url_str).unwrap_or_default();

    if domain.contains(source_domain) || source_domain.contains(&domain) {
        return url_str.to_string();
    }

    url.query_pairs()
        .find(|(k, _)| k == "url")
        .map_or_else(|| url_str.to_string(), |(_, v)| v.into_owned())
}

/// Check whether `url_str` looks like a news article URL.
///
/// Requires an http(s) URL with a non-root path whose shape suggests an
/// article: a date segment, a long slug, or a known article section.
#[must_use]
pub fn valid_url(url_str: &str) -> bool {
    let Ok(url) = Url::parse(url_str.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return false;
    }

    let path = url.path().trim_end_matches('/');
    if path.is_empty() {
        return false;
    }

    let chunks: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
    let Some(last) = chunks.last() else {
        return false;
    };

    if let Some((_, ext)) = last.rsplit_once('.') {
        if BAD_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return false;
        }
    }

    if URL_DATE_RE.is_match(path) {
        return true;
    }

    let lowered: Vec<String> = chunks.iter().map(|c| c.to_ascii_lowercase()).collect();
    if lowered.iter().any(|c| BAD_CHUNKS.contains(&c.as_str())) {
        return false;
    }

    let slug = last.rsplit_once('.').map_or(*last, |(stem, _)| stem);
    let separators = slug.matches(['-', '_']).count();
    if separators >= 2 {
        return true;
    }

    lowered.iter().any(|c| GOOD_CHUNKS.contains(&c.as_str())) && chunks.len() >= 2
}
