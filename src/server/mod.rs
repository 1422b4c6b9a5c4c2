// src/server/mod.rs
// =============================================================================
// The HTTP API in front of the crawler.
//
// Built with axum. Every route is open to any origin (permissive CORS) so a
// browser frontend hosted elsewhere can call it directly.
//
// Each request builds its own Crawler, so overlapping requests never see
// each other's visited pages or results. The only thing shared between
// requests is AppState: the HTTP client and the default depth.
// =============================================================================

mod routes;

use std::net::SocketAddr;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::crawl::PageFetcher;

// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub fetcher: PageFetcher,
    /// Depth used when a request doesn't pass ?depth=
    pub max_depth: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/check", get(routes::check_site))
        .route("/stream", get(routes::stream_site))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

// Binds `addr` and serves the API until the process is stopped
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Alt text checker API listening");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::time::Duration;

    // Serves the router on an ephemeral port and returns its base URL
    async fn spawn_api(max_depth: usize) -> String {
        let state = AppState {
            fetcher: PageFetcher::new(Duration::from_secs(5)).unwrap(),
            max_depth,
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    // The mocks are returned too: dropping a Mock removes it from the server
    async fn mock_site() -> (mockito::ServerGuard, Vec<mockito::Mock>) {
        let mut site = mockito::Server::new_async().await;
        let home = site
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(
                r#"
                <img src="/img/one.jpg" alt="photo">
                <img src="/img/two.jpg" alt="a beautiful mountain sunset">
                <a href="/more">More</a>
                "#,
            )
            .create_async()
            .await;
        let more = site
            .mock("GET", "/more")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<img src="/img/company-logo.png" alt="">"#)
            .create_async()
            .await;
        (site, vec![home, more])
    }

    #[tokio::test]
    async fn test_home() {
        let api = spawn_api(2).await;
        let body: Value = reqwest::get(&api).await.unwrap().json().await.unwrap();
        assert!(body["message"].as_str().unwrap().contains("running"));
    }

    #[tokio::test]
    async fn test_check_returns_all_findings() {
        let (site, _mocks) = mock_site().await;
        let api = spawn_api(2).await;

        let response = reqwest::Client::new()
            .get(format!("{}/check", api))
            .query(&[("url", site.url())])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["url"], site.url());
        let statuses: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["status"].as_str().unwrap())
            .collect();
        assert_eq!(statuses, vec!["Needs Fix", "OK", "Needs Fix"]);
        assert_eq!(body["results"][2]["suggestion"], "Image showing company logo");
    }

    #[tokio::test]
    async fn test_check_respects_depth_param() {
        let (site, _mocks) = mock_site().await;
        let api = spawn_api(2).await;

        let body: Value = reqwest::Client::new()
            .get(format!("{}/check", api))
            .query(&[("url", site.url()), ("depth", "0".to_string())])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_check_rejects_bad_url() {
        let api = spawn_api(2).await;

        let response = reqwest::Client::new()
            .get(format!("{}/check", api))
            .query(&[("url", "example.com")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].as_str().unwrap().contains("example.com"));
    }

    #[tokio::test]
    async fn test_missing_url_param_is_client_error() {
        let api = spawn_api(2).await;
        let response = reqwest::get(format!("{}/check", api)).await.unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_stream_frames() {
        let (site, _mocks) = mock_site().await;
        let api = spawn_api(2).await;

        let response = reqwest::Client::new()
            .get(format!("{}/stream", api))
            .query(&[("url", site.url())])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream"));

        let text = response.text().await.unwrap();
        let frames: Vec<&str> = text
            .lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3], "DONE");

        let first: Value = serde_json::from_str(frames[0]).unwrap();
        assert_eq!(first["type"], "result");
        assert_eq!(first["result"]["alt_text"], "photo");
        assert_eq!(first["result"]["status"], "Needs Fix");
    }

    #[tokio::test]
    async fn test_stream_rejects_bad_url() {
        let api = spawn_api(2).await;
        let response = reqwest::Client::new()
            .get(format!("{}/stream", api))
            .query(&[("url", "ftp://example.com/")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let api = spawn_api(2).await;
        let response = reqwest::Client::new()
            .get(&api)
            .header("origin", "https://frontend.example")
            .send()
            .await
            .unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
