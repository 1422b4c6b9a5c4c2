// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// The fetcher's one promise: it never fails the crawl. A page that times
// out, returns 404, is an image, or can't be reached at all just comes back
// as None ("no content") and a warning in the log.
//
// Rust concepts:
// - Option<T>: None means "nothing to crawl here"
// - Result<T, E> internally, so we can log *why* a page produced nothing
// =============================================================================

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::PageError;

// Fetches pages with a fixed per-request timeout
//
// Clone is cheap: reqwest::Client is a handle to a shared connection pool.
// It carries no crawl state, so every crawl can use the same fetcher.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("alt-checker/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    // Returns the HTML body of `url`, or None if the page has nothing for us
    pub async fn fetch(&self, url: &Url) -> Option<String> {
        match self.fetch_html(url).await {
            Ok(html) => Some(html),
            Err(PageError::NotHtml(content_type)) => {
                debug!(url = %url, content_type = %content_type, "Skipping non-HTML page");
                None
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch page");
                None
            }
        }
    }

    async fn fetch_html(&self, url: &Url) -> Result<String, PageError> {
        // Timeouts and refused connections surface here via From<reqwest::Error>
        let response = self.client.get(url.clone()).send().await?;

        // Only 2xx responses have a page worth reading
        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status(status.as_u16()));
        }

        // A missing header counts as not HTML
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(PageError::NotHtml(content_type));
        }

        // The body can still time out while it's being read
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<p>hello</p>")
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        assert_eq!(fetcher().fetch(&url).await.as_deref(), Some("<p>hello</p>"));
    }

    #[tokio::test]
    async fn test_non_html_is_no_content() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/data.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/data.json", server.url())).unwrap();
        assert!(matches!(
            fetcher().fetch_html(&url).await,
            Err(PageError::NotHtml(ct)) if ct == "application/json"
        ));
        assert_eq!(fetcher().fetch(&url).await, None);
    }

    #[tokio::test]
    async fn test_error_status_is_no_content() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_header("content-type", "text/html")
            .with_body("<h1>Not found</h1>")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();
        assert!(matches!(
            fetcher().fetch_html(&url).await,
            Err(PageError::Status(404))
        ));
        assert_eq!(fetcher().fetch(&url).await, None);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_no_content() {
        // Port 9 (discard) on localhost is almost never listening
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        assert_eq!(fetcher().fetch(&url).await, None);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        // Accepts the connection, never sends a byte back
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let fetcher = PageFetcher::new(Duration::from_millis(300)).unwrap();
        let url = Url::parse(&format!("http://{}/slow", addr)).unwrap();
        assert!(matches!(fetcher.fetch_html(&url).await, Err(PageError::Timeout)));
        assert_eq!(fetcher.fetch(&url).await, None);
    }
}
