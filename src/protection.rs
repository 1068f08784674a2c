//! Anti-bot protection detection for failed responses.

/// Body markers and the provider each one identifies, checked in order.
const SIGNATURES: &[(&str, &str)] = &[
    ("cloudflare", "Cloudflare"),
    ("/cdn-cgi/challenge-platform/h/b/orchestrate/chl_page", "Cloudflare"),
    ("cloud-flare", "Cloudflare"),
    ("CloudFront", "CloudFront"),
    ("perimeterx", "PerimeterX"),
];

/// Name of the protection provider whose marker appears in `body`.
///
/// Markers are matched case-sensitively, as the providers emit them.
#[must_use]
pub fn detect_protection(body: &str) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(marker, _)| body.contains(marker))
        .map(|(_, provider)| *provider)
}

/// `download_exception_msg` for a response with an error status.
#[must_use]
pub fn failure_message(body: &str, status: u16, url: &str) -> String {
    match detect_protection(body) {
        Some(provider) => format!("Website protected with {provider}, url: {url}"),
        None => format!("Status code {status} for url {url}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cloudflare_variants() {
        assert_eq!(detect_protection("<p>checked by cloudflare</p>"), Some("Cloudflare"));
        assert_eq!(
            detect_protection(r#"<script src="/cdn-cgi/challenge-platform/h/b/orchestrate/chl_page/v1"></script>"#),
            Some("Cloudflare")
        );
        assert_eq!(detect_protection("cloud-flare ray id"), Some("Cloudflare"));
    }

    #[test]
    fn detects_cdn_and_bot_mitigation() {
        assert_eq!(detect_protection("Generated by CloudFront (CloudFront)"), Some("CloudFront"));
        assert_eq!(detect_protection("<div id='px-captcha'>perimeterx</div>"), Some("PerimeterX"));
    }

    #[test]
    fn first_marker_wins() {
        assert_eq!(detect_protection("perimeterx and cloudflare"), Some("Cloudflare"));
    }

    #[test]
    fn no_marker() {
        assert_eq!(detect_protection("<h1>Not Found</h1>"), None);
        assert_eq!(detect_protection(""), None);
    }

    #[test]
    fn failure_messages() {
        assert_eq!(
            failure_message("cloudflare", 403, "https://x.test/a"),
            "Website protected with Cloudflare, url: https://x.test/a"
        );
        assert_eq!(
            failure_message("nope", 404, "https://x.test/a"),
            "Status code 404 for url https://x.test/a"
        );
    }
}
