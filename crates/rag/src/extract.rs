//! Structural extraction of web pages.
//!
//! Fetches a URL and reduces the returned HTML to the parts the
//! pipeline cares about: head markup, body markup, and the page's
//! outbound links classified as external or internal.

use scraper::{Html, Selector};
use std::collections::HashSet;
use webrag_core::{AppError, AppResult};

use crate::types::PageDocument;

/// Href prefixes treated as absolute (external) URLs.
const ABSOLUTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Fetches pages and extracts their structure.
pub struct Extractor {
    client: reqwest::Client,
}

impl Extractor {
    /// Create an extractor with a fresh HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create an extractor sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and extract its structure.
    ///
    /// Fails with `InvalidInput` for a blank or unparseable URL and
    /// `Transport` when the fetch errors or returns a non-success
    /// status. No retries.
    pub async fn extract(&self, url: &str) -> AppResult<PageDocument> {
        if url.trim().is_empty() {
            return Err(AppError::InvalidInput("URL must not be empty".to_string()));
        }
        url::Url::parse(url)
            .map_err(|e| AppError::InvalidInput(format!("invalid URL '{}': {}", url, e)))?;

        tracing::debug!(url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("fetch of {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| AppError::Transport(format!("fetch of {} failed: {}", url, e)))?;

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("reading body of {} failed: {}", url, e)))?;

        extract_from_html(url, &html)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract structure from already-fetched HTML. Pure; no network.
pub fn extract_from_html(url: &str, html: &str) -> AppResult<PageDocument> {
    let document = Html::parse_document(html);

    let head = inner_html(&document, "head")?;
    let body = inner_html(&document, "body")?;

    let anchor = selector("a")?;
    let mut external = HashSet::new();
    let mut internal = HashSet::new();

    for element in document.select(&anchor) {
        let href = match element.value().attr("href") {
            Some(href) if href != "/" => href,
            _ => continue,
        };

        if ABSOLUTE_SCHEMES.iter().any(|s| href.starts_with(s)) {
            external.insert(href.to_string());
        } else {
            internal.insert(href.to_string());
        }
    }

    tracing::debug!(
        url,
        external = external.len(),
        internal = internal.len(),
        "Extracted page structure"
    );

    Ok(PageDocument {
        url: url.to_string(),
        head,
        body,
        external_links: external.into_iter().collect(),
        internal_links: internal.into_iter().collect(),
    })
}

fn inner_html(document: &Html, element: &str) -> AppResult<String> {
    let sel = selector(element)?;
    Ok(document
        .select(&sel)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default())
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::InvalidInput(format!("bad selector '{}': {}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const SAMPLE: &str = "<html><head><title>A</title></head>\
        <body><p>B</p>\
        <a href=\"/\">x</a>\
        <a href=\"http://ext.com\">y</a>\
        <a href=\"/rel\">z</a>\
        </body></html>";

    #[test]
    fn test_sample_page_structure() {
        let page = extract_from_html("http://site.test", SAMPLE).unwrap();

        assert!(page.head.contains("<title>A</title>"));
        assert!(page.body.contains("<p>B</p>"));
        assert_eq!(page.external_links, vec!["http://ext.com".to_string()]);
        assert_eq!(page.internal_links, vec!["/rel".to_string()]);
    }

    #[test]
    fn test_root_href_and_missing_href_skipped() {
        let html = "<body><a href=\"/\">root</a><a>naked</a></body>";
        let page = extract_from_html("http://site.test", html).unwrap();

        assert!(page.external_links.is_empty());
        assert!(page.internal_links.is_empty());
    }

    #[test]
    fn test_links_are_deduplicated() {
        let html = "<body>\
            <a href=\"https://a.com\">1</a>\
            <a href=\"https://a.com\">2</a>\
            <a href=\"/p\">3</a>\
            <a href=\"/p\">4</a>\
            </body>";
        let page = extract_from_html("http://site.test", html).unwrap();

        assert_eq!(page.external_links.len(), 1);
        assert_eq!(page.internal_links.len(), 1);
    }

    #[test]
    fn test_missing_head_and_body_default_empty() {
        let page = extract_from_html("http://site.test", "plain text").unwrap();
        assert_eq!(page.head, "");
        // html5 parsers wrap stray text into a body element
        assert!(page.body.contains("plain text"));
    }

    #[test]
    fn test_https_links_are_external() {
        let html = "<body><a href=\"https://s.com/x\">s</a><a href=\"ftp://f.com\">f</a></body>";
        let page = extract_from_html("http://site.test", html).unwrap();

        assert_eq!(page.external_links, vec!["https://s.com/x".to_string()]);
        assert_eq!(page.internal_links, vec!["ftp://f.com".to_string()]);
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_url() {
        let extractor = Extractor::new();
        let err = extractor.extract("   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_extract_rejects_unparseable_url() {
        let extractor = Extractor::new();
        let err = extractor.extract("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_extract_fetches_over_http() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200).body(SAMPLE);
            })
            .await;

        let extractor = Extractor::new();
        let url = format!("{}/page", server.base_url());
        let page = extractor.extract(&url).await.unwrap();

        assert!(page.head.contains("<title>A</title>"));
        assert_eq!(page.url, url);
    }

    #[tokio::test]
    async fn test_extract_propagates_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone");
                then.status(404);
            })
            .await;

        let extractor = Extractor::new();
        let err = extractor
            .extract(&format!("{}/gone", server.base_url()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }
}
