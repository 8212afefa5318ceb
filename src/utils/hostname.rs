//! Hostname helpers for blocklist matching.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use url::Url;

use crate::error::AppError;

/// Captures the rightmost two dot-separated labels of a hostname.
static REGISTRABLE_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:.+\.)?(.+\..+)$").unwrap());

/// Reduces a hostname to its rightmost two labels.
///
/// `a.b.example.com` becomes `example.com`. Hostnames with fewer than two
/// labels are returned unchanged.
///
/// Multi-part public suffixes are not recognized: `shop.example.co.uk`
/// becomes `co.uk`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(registrable_domain("sub.example.com"), "example.com");
/// assert_eq!(registrable_domain("example.com"), "example.com");
/// assert_eq!(registrable_domain("localhost"), "localhost");
/// ```
pub fn registrable_domain(hostname: &str) -> String {
    REGISTRABLE_DOMAIN_REGEX
        .replace(hostname, "$1")
        .into_owned()
}

/// Lowercases a hostname and drops surrounding whitespace and the trailing
/// root dot, so `X.Bad.com.` and `x.bad.com` compare equal.
pub fn normalize_hostname(hostname: &str) -> String {
    hostname.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// Parses a long URL and returns it together with its normalized hostname.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL is malformed, not HTTP(S), or
/// has no host.
pub fn parse_long_url(input: &str) -> Result<(Url, String), AppError> {
    let url = Url::parse(input).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::bad_request(
                "Only HTTP and HTTPS URLs can be shortened",
                json!({ "scheme": scheme }),
            ));
        }
    }

    let hostname = url
        .host_str()
        .map(normalize_hostname)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::bad_request("URL has no host", json!({ "url": input })))?;

    Ok((url, hostname))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrable_domain_strips_subdomains() {
        assert_eq!(registrable_domain("sub.example.com"), "example.com");
        assert_eq!(registrable_domain("a.b.example.com"), "example.com");
    }

    #[test]
    fn test_registrable_domain_keeps_two_labels() {
        assert_eq!(registrable_domain("example.com"), "example.com");
    }

    #[test]
    fn test_registrable_domain_single_label_unchanged() {
        assert_eq!(registrable_domain("localhost"), "localhost");
    }

    #[test]
    fn test_registrable_domain_multi_part_suffix() {
        assert_eq!(registrable_domain("shop.example.co.uk"), "co.uk");
    }

    #[test]
    fn test_registrable_domain_empty() {
        assert_eq!(registrable_domain(""), "");
    }

    #[test]
    fn test_parse_long_url_returns_lowercase_host() {
        let (url, host) = parse_long_url("https://Sub.Example.COM/Path?q=1").unwrap();
        assert_eq!(host, "sub.example.com");
        assert_eq!(url.path(), "/Path");
    }

    #[test]
    fn test_parse_long_url_rejects_other_schemes() {
        assert!(parse_long_url("javascript:alert(1)").is_err());
        assert!(parse_long_url("ftp://example.com/file").is_err());
        assert!(parse_long_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_parse_long_url_rejects_garbage() {
        let result = parse_long_url("not-a-url");
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_normalize_hostname_trailing_dot() {
        assert_eq!(normalize_hostname(" X.Bad.com. "), "x.bad.com");
        assert_eq!(normalize_hostname("bad.com.."), "bad.com");
        assert_eq!(normalize_hostname("."), "");
    }

    #[test]
    fn test_parse_long_url_strips_trailing_dot() {
        let (url, host) = parse_long_url("https://x.bad.com./p").unwrap();
        assert_eq!(host, "x.bad.com");
        assert_eq!(url.host_str(), Some("x.bad.com."));
        assert_eq!(registrable_domain(&host), "bad.com");
    }

    #[test]
    fn test_parse_long_url_ip_host() {
        let (_, host) = parse_long_url("http://192.168.1.1:8080/").unwrap();
        assert_eq!(host, "192.168.1.1");
    }
}
