//! Body validity classifier: decides whether a parsed page is a real article.

use tracing::debug;

use crate::options::Options;

/// URL path fragments of media-heavy pages that may carry no body text.
pub const MEDIA_URL_PATTERNS: &[&str] = &[
    "/video",
    "/slide",
    "/gallery",
    "/powerpoint",
    "/fashion",
    "/glamour",
    "/cloth",
];

/// The parsed fields the classifier looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodySignals<'a> {
    /// Resolved article URL.
    pub url: &'a str,
    /// Page type reported by the metadata extractor (`og:type`).
    pub meta_type: Option<&'a str>,
    /// Extracted title.
    pub title: &'a str,
    /// Extracted body text.
    pub text: &'a str,
    /// Raw downloaded HTML.
    pub html: &'a str,
}

/// Whether `url` points at a media-heavy page (video, gallery, slideshow...).
#[must_use]
pub fn is_media_url(url: &str) -> bool {
    MEDIA_URL_PATTERNS.iter().any(|p| url.contains(p))
}

/// Classify a parsed page. The first matching rule decides:
///
/// 1. `og:type` is `article` and the word count exceeds the minimum: valid.
/// 2. Not a media URL and no body text: invalid.
/// 3. Title with fewer than two words: invalid.
/// 4. Too few words or sentences: invalid.
/// 5. No HTML: invalid.
/// 6. Otherwise valid.
///
/// Words are counted as `' '`-separated pieces and sentences as
/// `'.'`-separated pieces, so empty text still counts as one of each.
#[must_use]
pub fn is_valid_body(signals: &BodySignals<'_>, options: &Options) -> bool {
    let word_count = signals.text.split(' ').count();
    let sentence_count = signals.text.split('.').count();

    if signals.meta_type == Some("article") && word_count > options.min_word_count {
        debug!(url = %signals.url, "valid: article type and word count");
        return true;
    }
    if !is_media_url(signals.url) && signals.text.is_empty() {
        debug!(url = %signals.url, "invalid: no media and no text");
        return false;
    }
    if signals.title.split(' ').count() < 2 {
        debug!(url = %signals.url, "invalid: title too short");
        return false;
    }
    if word_count < options.min_word_count {
        debug!(url = %signals.url, word_count, "invalid: too few words");
        return false;
    }
    if sentence_count < options.min_sent_count {
        debug!(url = %signals.url, sentence_count, "invalid: too few sentences");
        return false;
    }
    if signals.html.is_empty() {
        debug!(url = %signals.url, "invalid: no html");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word."; n].join(" ")
    }

    #[test]
    fn article_type_with_enough_words_is_valid_regardless_of_title() {
        let text = words(301);
        let signals = BodySignals {
            url: "https://x.test/a",
            meta_type: Some("article"),
            title: "",
            text: &text,
            html: "",
        };
        assert!(is_valid_body(&signals, &Options::default()));
    }

    #[test]
    fn empty_text_on_regular_url_is_invalid() {
        let signals = BodySignals {
            url: "https://x.test/politics/story",
            title: "Some long title",
            html: "<html></html>",
            ..BodySignals::default()
        };
        assert!(!is_valid_body(&signals, &Options::default()));
    }

    #[test]
    fn media_url_skips_empty_text_rule() {
        let signals = BodySignals {
            url: "https://x.test/gallery/red-carpet",
            title: "Red carpet",
            html: "<html></html>",
            ..BodySignals::default()
        };
        let options = Options {
            min_word_count: 1,
            min_sent_count: 1,
            ..Options::default()
        };
        assert!(is_valid_body(&signals, &options));
    }

    #[test]
    fn single_word_title_is_invalid() {
        let text = words(400);
        let signals = BodySignals {
            url: "https://x.test/a",
            title: "Headline",
            text: &text,
            html: "<p>x</p>",
            ..BodySignals::default()
        };
        assert!(!is_valid_body(&signals, &Options::default()));
    }

    #[test]
    fn word_and_sentence_minimums() {
        let options = Options::default();
        let short = words(10);
        let signals = BodySignals {
            url: "https://x.test/a",
            title: "Two words",
            text: &short,
            html: "<p>x</p>",
            ..BodySignals::default()
        };
        assert!(!is_valid_body(&signals, &options));

        // Enough words but a single sentence.
        let run_on = vec!["word"; 400].join(" ");
        let signals = BodySignals { text: &run_on, ..signals };
        assert!(!is_valid_body(&signals, &options));

        let long = words(400);
        let signals = BodySignals { text: &long, ..signals };
        assert!(is_valid_body(&signals, &options));
    }

    #[test]
    fn empty_html_is_invalid() {
        let text = words(400);
        let signals = BodySignals {
            url: "https://x.test/a",
            title: "Two words",
            text: &text,
            html: "",
            ..BodySignals::default()
        };
        assert!(!is_valid_body(&signals, &Options::default()));
    }

    #[test]
    fn media_patterns() {
        assert!(is_media_url("https://x.test/video/123"));
        assert!(is_media_url("https://x.test/slideshow/1"));
        assert!(!is_media_url("https://x.test/news/1"));
    }
}
