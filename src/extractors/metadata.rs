//! Page metadata from `<meta>` and `<link>` tags.

use crate::dom::{self, Document, Selection};
use crate::extractors::PageMetadata;
use crate::url_utils;

/// Collect language, site name, description, canonical link, keywords,
/// tags, page type and the raw meta map.
#[must_use]
pub fn extract_metadata(url: &str, doc: &Document) -> PageMetadata {
    let mut result = PageMetadata::default();

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);

        let name = dom::non_empty_attribute(&meta, "property")
            .or_else(|| dom::non_empty_attribute(&meta, "name"))
            .or_else(|| dom::non_empty_attribute(&meta, "itemprop"))
            .or_else(|| dom::non_empty_attribute(&meta, "http-equiv"))
            .unwrap_or_default()
            .to_lowercase();
        let content = dom::non_empty_attribute(&meta, "content").unwrap_or_default();

        if name.is_empty() || content.is_empty() {
            continue;
        }

        match name.as_str() {
            "og:site_name" => {
                result.site_name.get_or_insert_with(|| content.clone());
            }
            "description" | "og:description" | "twitter:description" | "dc.description" => {
                result.description.get_or_insert_with(|| content.clone());
            }
            "keywords" | "news_keywords" => {
                if result.keywords.is_empty() {
                    result.keywords = split_list(&content);
                }
            }
            "article:tag" => {
                result.tags.extend(split_list(&content));
            }
            "og:type" => {
                result.page_type.get_or_insert_with(|| content.to_lowercase());
            }
            "lang" | "language" | "content-language" | "dc.language" | "og:locale" => {
                if result.language.is_none() {
                    result.language = primary_language(&content);
                }
            }
            _ => {}
        }

        result.data.entry(name).or_insert(content);
    }

    if result.language.is_none() {
        result.language = dom::non_empty_attribute(&doc.select("html"), "lang")
            .and_then(|lang| primary_language(&lang));
    }

    result.canonical_link = canonical_link(url, doc, &result);

    for node in doc.select(r#"a[rel="tag"], a[href*="/tag/"], a[href*="/tags/"], a[href*="/topic/"]"#).nodes() {
        let tag = dom::normalize_whitespace(&Selection::from(*node).text());
        if !tag.is_empty() {
            result.tags.insert(tag);
        }
    }

    result
}

/// `<link rel="canonical">`, else `og:url`, made absolute against `url`.
fn canonical_link(url: &str, doc: &Document, meta: &PageMetadata) -> Option<String> {
    let href = doc
        .select(r#"link[rel="canonical"]"#)
        .nodes()
        .iter()
        .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), "href"))
        .or_else(|| meta.data.get("og:url").cloned())?;

    match url_utils::urljoin_if_valid(url, &href) {
        Some(joined) => Some(joined),
        None => url_utils::get_scheme(&href).map(|_| href),
    }
}

/// `en-US`, `en_GB`, `EN` → `en`.
fn primary_language(value: &str) -> Option<String> {
    let lang = value
        .split(['-', '_', ',', ';'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    (lang.len() == 2 && lang.chars().all(|c| c.is_ascii_alphabetic())).then_some(lang)
}

fn split_list(content: &str) -> Vec<String> {
    content
        .split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
    <html lang="de-DE">
    <head>
        <meta property="og:site_name" content="Daily Example">
        <meta name="description" content="Flooding in the valley.">
        <meta property="og:description" content="Ignored, description already set.">
        <meta name="keywords" content="flood, valley ; weather">
        <meta property="article:tag" content="Climate">
        <meta property="og:type" content="Article">
        <link rel="canonical" href="/news/flood">
    </head>
    <body>
        <a rel="tag" href="/t/rain">Rain</a>
        <a href="/tag/storms">Storms</a>
    </body>
    </html>"#;

    #[test]
    fn reads_standard_fields() {
        let doc = Document::from(PAGE);
        let meta = extract_metadata("https://x.test/a/b", &doc);

        assert_eq!(meta.site_name.as_deref(), Some("Daily Example"));
        assert_eq!(meta.description.as_deref(), Some("Flooding in the valley."));
        assert_eq!(meta.keywords, vec!["flood", "valley", "weather"]);
        assert_eq!(meta.page_type.as_deref(), Some("article"));
        assert_eq!(meta.language.as_deref(), Some("de"));
        assert_eq!(meta.canonical_link.as_deref(), Some("https://x.test/news/flood"));
    }

    #[test]
    fn collects_tags_and_raw_data() {
        let doc = Document::from(PAGE);
        let meta = extract_metadata("https://x.test/a/b", &doc);

        let tags: Vec<&str> = meta.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["Climate", "Rain", "Storms"]);
        assert_eq!(meta.data.get("og:site_name").map(String::as_str), Some("Daily Example"));
        assert_eq!(meta.data.get("description").map(String::as_str), Some("Flooding in the valley."));
    }

    #[test]
    fn meta_language_wins_over_html_lang() {
        let doc = Document::from(
            r#"<html lang="en"><head><meta http-equiv="content-language" content="fr-FR"></head></html>"#,
        );
        let meta = extract_metadata("https://x.test/", &doc);
        assert_eq!(meta.language.as_deref(), Some("fr"));
    }

    #[test]
    fn canonical_from_og_url() {
        let doc = Document::from(r#"<meta property="og:url" content="https://x.test/canon">"#);
        let meta = extract_metadata("https://x.test/other", &doc);
        assert_eq!(meta.canonical_link.as_deref(), Some("https://x.test/canon"));
    }

    #[test]
    fn empty_document() {
        let meta = extract_metadata("https://x.test/", &Document::from("<p>nothing</p>"));
        assert_eq!(meta, PageMetadata::default());
    }
}
