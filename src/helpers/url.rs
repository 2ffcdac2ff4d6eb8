//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/site/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/") // -> "https://example.com/site/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Percent-encode a slug so it is safe as one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Whether a link target leaves the site (opens in a new browsing context)
pub fn is_external(href: &str) -> bool {
    href.starts_with("http")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/site/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/site/css/style.css");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(full_url_for(&config, "/"), "https://example.com/site/");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("my-project"), "my-project");
        assert_eq!(encode_segment("a b/c?"), "a%20b%2Fc%3F");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://example.com"));
        assert!(is_external("http://example.com"));
        assert!(!is_external("/internal"));
        assert!(!is_external("mailto:me@example.com"));
    }
}
