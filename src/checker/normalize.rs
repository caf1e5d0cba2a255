// src/checker/normalize.rs
// =============================================================================
// This module turns raw href values into absolute URLs.
//
// Rules:
// - Empty hrefs and anything containing '#' are dropped entirely
//   (same-page anchors and links to sections of other pages alike)
// - Only http, https or scheme-less (relative) references are accepted
// - A reference that carries its own host is returned exactly as written
// - Everything else is resolved against the base URL using standard
//   relative reference resolution (the `url` crate's `join`)
//
// No network I/O happens here.
// =============================================================================

use url::{ParseError, Url};

/// Normalizes one href against `base`. Returns None for "not a link".
///
/// Examples with base = "https://example.org/":
///   "/about"                -> Some("https://example.org/about")
///   "contact"               -> Some("https://example.org/contact")
///   "https://other.test"    -> Some("https://other.test")   (unchanged)
///   "//cdn.test/lib.js"     -> Some("https://cdn.test/lib.js")
///   "#top", "page#section"  -> None
///   "mailto:a@b.test"       -> None
pub fn normalize_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.contains('#') {
        return None;
    }

    match Url::parse(href) {
        Ok(parsed) => {
            if !is_web_scheme(parsed.scheme()) {
                return None;
            }

            if has_network_location(href, parsed.scheme()) {
                // Already absolute: keep the author's spelling
                Some(href.to_string())
            } else {
                // "http:page" style: scheme but no host, resolve it
                resolve(base, href)
            }
        }
        // No scheme at all, so this is a relative reference
        Err(ParseError::RelativeUrlWithoutBase) => resolve(base, href),
        Err(_) => None,
    }
}

/// The part of a URL that decides whether two links live on the same site:
/// host plus explicit port, like "example.org" or "127.0.0.1:8080".
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Same as `authority` but for a URL that is still a string
pub fn authority_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(authority)
}

fn is_web_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

// The url crate always invents a host for http(s), so we look at the raw
// text instead: a network location starts right after "scheme:" with "//".
fn has_network_location(href: &str, scheme: &str) -> bool {
    href.get(scheme.len() + 1..)
        .map(|rest| rest.starts_with("//"))
        .unwrap_or(false)
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href).ok().map(String::from)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Url::join do?
//    - It resolves a relative reference the way a browser does (RFC 3986)
//    - "https://example.org/docs/a" + "b"   = "https://example.org/docs/b"
//    - "https://example.org/docs/a" + "/b"  = "https://example.org/b"
//    - "https://example.org/docs/a" + "?q"  = "https://example.org/docs/a?q"
//
// 2. Why match on ParseError::RelativeUrlWithoutBase?
//    - Url::parse only accepts absolute URLs
//    - That specific error means "this looks fine, it just needs a base",
//      which is exactly what a relative href is
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.org/").unwrap()
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            normalize_link("/about", &base()),
            Some("https://example.org/about".to_string())
        );
    }

    #[test]
    fn test_path_relative() {
        assert_eq!(
            normalize_link("contact", &base()),
            Some("https://example.org/contact".to_string())
        );

        let nested = Url::parse("https://example.org/docs/guide/intro").unwrap();
        assert_eq!(
            normalize_link("../api", &nested),
            Some("https://example.org/docs/api".to_string())
        );
        assert_eq!(
            normalize_link("setup", &nested),
            Some("https://example.org/docs/guide/setup".to_string())
        );
    }

    #[test]
    fn test_query_only_reference() {
        let page = Url::parse("https://example.org/search/results").unwrap();
        assert_eq!(
            normalize_link("?page=2", &page),
            Some("https://example.org/search/results?page=2".to_string())
        );
    }

    #[test]
    fn test_absolute_returned_unchanged() {
        // No trailing slash gets added, no re-resolution happens
        assert_eq!(
            normalize_link("https://example.com", &base()),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            normalize_link("http://test.com/page", &base()),
            Some("http://test.com/page".to_string())
        );
    }

    #[test]
    fn test_protocol_relative_takes_base_scheme() {
        assert_eq!(
            normalize_link("//cdn.test/lib.js", &base()),
            Some("https://cdn.test/lib.js".to_string())
        );
    }

    #[test]
    fn test_fragments_rejected() {
        assert_eq!(normalize_link("#", &base()), None);
        assert_eq!(normalize_link("#top", &base()), None);
        assert_eq!(normalize_link("page#section", &base()), None);
        assert_eq!(normalize_link("https://other.test/a#b", &base()), None);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(normalize_link("", &base()), None);
        assert_eq!(normalize_link("   ", &base()), None);
    }

    #[test]
    fn test_other_schemes_rejected() {
        for href in [
            "mailto:test@example.com",
            "tel:+1234567890",
            "ftp://example.com/file",
            "javascript:void(0)",
            "data:text/plain,hello",
        ] {
            assert_eq!(normalize_link(href, &base()), None, "{}", href);
        }
    }

    #[test]
    fn test_authority_includes_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert_eq!(authority(&url), Some("127.0.0.1:8080".to_string()));

        // Default ports are not spelled out by the url crate
        let url = Url::parse("https://example.org:443/").unwrap();
        assert_eq!(authority(&url), Some("example.org".to_string()));
    }

    #[test]
    fn test_authority_of_unparseable() {
        assert_eq!(authority_of("not a url"), None);
        assert_eq!(
            authority_of("https://b.test/y"),
            Some("b.test".to_string())
        );
    }
}
