//! Image and video extraction.

use std::collections::HashSet;

use crate::dom::{self, Document, Selection};
use crate::extractors::{ImageSet, Video};
use crate::url_utils;

/// Embed hosts recognised as video providers.
const VIDEO_PROVIDERS: &[&str] = &["youtube", "youtu.be", "vimeo", "dailymotion", "kewego", "twitch"];

/// Meta/link tags naming the page's representative image, in priority order.
const META_IMAGE: &[(&str, &str)] = &[
    (r#"meta[property="og:image"]"#, "content"),
    (r#"meta[name="og:image"]"#, "content"),
    (r#"link[rel="img_src"]"#, "href"),
    (r#"meta[name="twitter:image"]"#, "content"),
    (r#"meta[name="twitter:image:src"]"#, "content"),
];

/// Collect page images.
///
/// Content images come from `node` when given, else from the whole body.
/// The top image is the meta image when present, else the first content
/// image.
#[must_use]
pub fn extract_images(url: &str, doc: &Document, node: Option<&Selection>) -> ImageSet {
    let meta_image = META_IMAGE.iter().find_map(|(selector, attr)| {
        doc.select(selector)
            .nodes()
            .iter()
            .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), attr))
            .and_then(|src| absolute(url, &src))
    });

    let favicon = doc
        .select(r#"link[rel~="icon"], link[rel="shortcut icon"], link[rel="apple-touch-icon"]"#)
        .nodes()
        .iter()
        .find_map(|n| dom::non_empty_attribute(&Selection::from(*n), "href"))
        .and_then(|href| absolute(url, &href));

    let images = collect_images(url, &doc.select("body"));
    let content_images = match node {
        Some(node) => collect_images(url, node),
        None => images.clone(),
    };

    let top_image = meta_image.clone().or_else(|| content_images.into_iter().next());

    ImageSet {
        top_image,
        meta_image,
        images,
        favicon,
    }
}

/// Absolute image URLs under `root`, document order, deduplicated.
fn collect_images(url: &str, root: &Selection) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for node in root.select("img").nodes() {
        let img = Selection::from(*node);
        let src = dom::non_empty_attribute(&img, "src")
            .filter(|s| !s.starts_with("data:"))
            .or_else(|| dom::non_empty_attribute(&img, "data-src"))
            .or_else(|| dom::non_empty_attribute(&img, "data-lazy-src"));

        let Some(src) = src.and_then(|s| absolute(url, &s)) else {
            continue;
        };
        if seen.insert(src.clone()) {
            images.push(src);
        }
    }

    images
}

/// Embedded videos from known providers, under `node` or the whole body.
#[must_use]
pub fn extract_videos(doc: &Document, node: Option<&Selection>) -> Vec<Video> {
    let body = doc.select("body");
    let root = node.unwrap_or(&body);

    let mut seen = HashSet::new();
    let mut videos = Vec::new();

    for n in root.select("iframe, embed, object, video, video source").nodes() {
        let el = Selection::from(*n);
        let src = dom::non_empty_attribute(&el, "src")
            .or_else(|| dom::non_empty_attribute(&el, "data"))
            .or_else(|| dom::non_empty_attribute(&el, "data-src"));
        let Some(src) = src else {
            continue;
        };
        let Some(provider) = provider(&src) else {
            continue;
        };
        if !seen.insert(src.clone()) {
            continue;
        }
        videos.push(Video {
            provider: provider.to_string(),
            src,
            width: dom::get_attribute(&el, "width").and_then(|w| w.trim().parse().ok()),
            height: dom::get_attribute(&el, "height").and_then(|h| h.trim().parse().ok()),
        });
    }

    videos
}

fn provider(src: &str) -> Option<&'static str> {
    let lowered = src.to_ascii_lowercase();
    VIDEO_PROVIDERS
        .iter()
        .find(|p| lowered.contains(*p))
        .map(|p| if *p == "youtu.be" { "youtube" } else { *p })
}

fn absolute(base: &str, src: &str) -> Option<String> {
    url_utils::urljoin_if_valid(base, src).or_else(|| url_utils::get_scheme(src).map(|_| src.to_string()))
}
