//! Publish date from the URL path, meta tags and `<time>` elements.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use crate::dom::{self, Document, Selection};

/// `/2024/03/15/` or `2024-03-15` inside a URL.
#[allow(clippy::expect_used)]
static URL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[/_-])((?:19|20)\d{2})[/_-]?(0[1-9]|1[0-2])[/_-]?(0[1-9]|[12]\d|3[01])(?:$|[/_.-])")
        .expect("valid regex")
});

/// Meta attributes carrying a publish date, most specific first.
const DATE_META: &[(&str, &str)] = &[
    ("property", "article:published_time"),
    ("property", "rnews:datePublished"),
    ("name", "OriginalPublicationDate"),
    ("property", "article:published"),
    ("itemprop", "datePublished"),
    ("property", "og:published_time"),
    ("name", "article_date_original"),
    ("name", "publication_date"),
    ("name", "sailthru.date"),
    ("name", "PublishDate"),
    ("name", "pubdate"),
    ("name", "publish_date"),
    ("name", "dc.date"),
    ("name", "date"),
];

/// Publish date of the article, if one can be found.
#[must_use]
pub fn extract_publish_date(url: &str, doc: &Document) -> Option<DateTime<Utc>> {
    if let Some(date) = date_from_url(url) {
        return Some(date);
    }

    for (attr, value) in DATE_META {
        let selector = format!(r#"[{attr}="{value}"]"#);
        for node in doc.select(&selector).nodes() {
            let el = Selection::from(*node);
            let raw = dom::non_empty_attribute(&el, "content")
                .or_else(|| dom::non_empty_attribute(&el, "datetime"))
                .unwrap_or_else(|| el.text().trim().to_string());
            if let Some(date) = parse_date(&raw) {
                return Some(date);
            }
        }
    }

    doc.select("time[datetime]")
        .nodes()
        .iter()
        .filter_map(|n| dom::non_empty_attribute(&Selection::from(*n), "datetime"))
        .find_map(|raw| parse_date(&raw))
}

/// Date encoded in the URL path.
#[must_use]
pub fn date_from_url(url: &str) -> Option<DateTime<Utc>> {
    let caps = URL_DATE.captures(url)?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    Some(NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse the date formats found in meta tags and `datetime` attributes.
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }

    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
