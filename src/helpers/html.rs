//! HTML helper functions

use super::url::{is_external, url_for};
use crate::config::SiteConfig;

/// Generate a CSS link tag
///
/// # Examples
/// ```ignore
/// css(&config, "style.css") // -> <link rel="stylesheet" href="/css/style.css">
/// ```
pub fn css(config: &SiteConfig, path: &str) -> String {
    let path =
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
            path.to_string()
        } else {
            let path = if path.ends_with(".css") {
                path.to_string()
            } else {
                format!("{}.css", path)
            };
            url_for(config, &format!("css/{}", path.trim_start_matches('/')))
        };

    format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(&path))
}

/// Attributes for an anchor pointing at `href`
///
/// Off-site targets open in a new browsing context that can neither reach
/// the opener nor receive a referrer.
pub fn link_attrs(href: &str) -> String {
    if is_external(href) {
        format!(
            r#"href="{}" target="_blank" rel="noopener noreferrer""#,
            html_escape(href)
        )
    } else {
        format!(r#"href="{}""#, html_escape(href))
    }
}

/// Generate an anchor tag; `text` is escaped
///
/// # Examples
/// ```ignore
/// link_to("https://github.com/me", "GitHub") // -> <a href=".." target="_blank" rel="noopener noreferrer">GitHub</a>
/// ```
pub fn link_to(href: &str, text: &str) -> String {
    format!("<a {}>{}</a>", link_attrs(href), html_escape(text))
}

/// Generate an image tag
pub fn image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" loading="lazy">"#,
        html_escape(src),
        html_escape(alt)
    )
}

/// Generate Open Graph meta tags
pub fn open_graph(title: &str, description: &str, url: &str, site_name: &str) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="website">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
