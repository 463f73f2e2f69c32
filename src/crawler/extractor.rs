//! Link extraction from fetched pages
//!
//! The coordinator only sees the [`LinkExtractor`] trait. The default
//! [`HtmlLinkExtractor`] parses `<a href>` anchors with `scraper` and keeps the
//! ones that stay on the seed's host.

use crate::crawler::fetcher::Page;
use crate::url::same_authority;
use scraper::{Html, Selector};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Errors raised while extracting links from a single page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page URL {0} cannot be used to resolve links")]
    UnresolvableBase(String),

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Capability that turns a fetched page into same-domain link targets
///
/// Returned URLs must be absolute and share the seed's host authority.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, page: &Page, seed: &Url) -> Result<HashSet<Url>, ExtractError>;
}

/// Default extractor for HTML pages
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anchors, resolved against `<base href>` when present,
///   otherwise against the page's final URL
///
/// **Exclude:**
/// - fragment-only links (`#section`)
/// - `javascript:`, `mailto:`, `tel:`, `data:` links
/// - `<a href="..." download>`
/// - non-HTTP(S) URLs after resolution
/// - URLs whose host or port differ from the seed's
///
/// Pages that are not HTML yield no links.
#[derive(Debug, Clone, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, page: &Page, seed: &Url) -> Result<HashSet<Url>, ExtractError> {
        if page.url.cannot_be_a_base() {
            return Err(ExtractError::UnresolvableBase(page.url.to_string()));
        }

        if !page.is_html() {
            tracing::trace!("Skipping link extraction for non-HTML page {}", page.url);
            return Ok(HashSet::new());
        }

        let document = Html::parse_document(&page.body);
        let base = document_base(&document, &page.url)?;

        let a_selector =
            Selector::parse("a[href]").map_err(|e| ExtractError::Selector(e.to_string()))?;

        let mut links = HashSet::new();
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if let Some(url) = resolve_link(href, &base) {
                if same_authority(seed, &url) {
                    links.insert(url);
                }
            }
        }

        Ok(links)
    }
}

/// Returns the URL relative links are resolved against
///
/// A `<base href>` element overrides the page URL.
fn document_base(document: &Html, page_url: &Url) -> Result<Url, ExtractError> {
    let base_selector =
        Selector::parse("base[href]").map_err(|e| ExtractError::Selector(e.to_string()))?;

    let base = document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .filter(|url| !url.cannot_be_a_base())
        .unwrap_or_else(|| page_url.clone());

    Ok(base)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    match absolute.scheme() {
        "http" | "https" => Some(absolute),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    fn page(url: &str, body: &str) -> Page {
        Page {
            url: Url::parse(url).unwrap(),
            status: 200,
            content_type: Some("text/html".to_string()),
            body: body.to_string(),
        }
    }

    fn extract(body: &str) -> HashSet<String> {
        HtmlLinkExtractor::new()
            .extract(&page("https://example.com/docs/page", body), &seed())
            .unwrap()
            .into_iter()
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<a href="https://example.com/about">About</a>"#);
        assert!(links.contains("https://example.com/about"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extract_relative_links() {
        let links = extract(r#"<a href="/root">R</a><a href="sibling">S</a><a href="../up">U</a>"#);
        assert!(links.contains("https://example.com/root"));
        assert!(links.contains("https://example.com/docs/sibling"));
        assert!(links.contains("https://example.com/up"));
    }

    #[test]
    fn test_skip_other_domains() {
        let links = extract(
            r#"<a href="https://other.example/x">X</a>
               <a href="https://blog.example.com/">Blog</a>
               <a href="https://example.com:8443/">Port</a>
               <a href="/kept">Kept</a>"#,
        );
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://example.com/kept"));
    }

    #[test]
    fn test_scheme_may_differ() {
        let links = extract(r#"<a href="http://example.com/plain">P</a>"#);
        assert!(links.contains("http://example.com/plain"));
    }

    #[test]
    fn test_skip_special_schemes() {
        let links = extract(
            r#"<a href="javascript:void(0)">J</a>
               <a href="mailto:test@example.com">M</a>
               <a href="tel:+1234567890">T</a>
               <a href="data:text/html,<h1>x</h1>">D</a>
               <a href="ftp://example.com/file">F</a>"#,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only_and_download() {
        let links = extract(
            r##"<a href="#section">Jump</a><a href="/file.pdf" download>Get</a><a href="">Empty</a>"##,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_fragment_links_to_other_pages_kept() {
        let links = extract(r#"<a href="/about#team">Team</a>"#);
        assert!(links.contains("https://example.com/about#team"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let links = extract(r#"<a href="/a">1</a><a href="/a">2</a><a href="https://example.com/a">3</a>"#);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_base_element_overrides_page_url() {
        let links = extract(
            r#"<html><head><base href="https://example.com/static/"></head>
               <body><a href="logo">Logo</a></body></html>"#,
        );
        assert!(links.contains("https://example.com/static/logo"));
    }

    #[test]
    fn test_resolves_against_final_url_but_filters_by_seed() {
        // Page was redirected to a different host; its links stay off-limits
        let redirected = page(
            "https://cdn.example.net/landing",
            r#"<a href="/asset">A</a><a href="https://example.com/back">B</a>"#,
        );
        let links = HtmlLinkExtractor::new().extract(&redirected, &seed()).unwrap();

        assert_eq!(links.len(), 1);
        assert!(links.contains(&Url::parse("https://example.com/back").unwrap()));
    }

    #[test]
    fn test_non_html_yields_nothing() {
        let mut pdf = page("https://example.com/doc.pdf", r#"<a href="/x">x</a>"#);
        pdf.content_type = Some("application/pdf".to_string());
        assert!(HtmlLinkExtractor::new().extract(&pdf, &seed()).unwrap().is_empty());
    }

    #[test]
    fn test_unresolvable_base() {
        let odd = page("data:text/html,hello", "<a href='/x'>x</a>");
        let result = HtmlLinkExtractor::new().extract(&odd, &seed());
        assert!(matches!(result, Err(ExtractError::UnresolvableBase(_))));
    }
}
