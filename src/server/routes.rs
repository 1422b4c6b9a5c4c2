// src/server/routes.rs
// =============================================================================
// HTTP handlers for the alt text API.
//
//   GET /                    -> status message
//   GET /check?url=..        -> every finding at once, as JSON
//   GET /stream?url=..       -> findings as Server-Sent Events, then DONE
//
// Both crawl endpoints take an optional `depth` parameter. The handlers are
// thin: validation and crawling live in crate::crawl, and this file only
// turns results and errors into HTTP responses.
// =============================================================================

use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json, Response};
use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::task::JoinError;
use tracing::{error, warn};

use super::AppState;
use crate::checker::ImageFinding;
use crate::crawl::{crawl_batch, crawl_stream, CrawlEvent};
use crate::error::CrawlError;

#[derive(Debug, Deserialize)]
pub struct CrawlParams {
    /// Website URL to scan (must start with http or https)
    pub url: String,
    /// Maximum link hops from `url`; the configured default when missing
    pub depth: Option<usize>,
}

// A CrawlError on its way out as an HTTP response
pub struct ApiError {
    url: String,
    error: CrawlError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.error {
            // The caller's fault: tell them what was wrong
            CrawlError::InvalidInput(message) => {
                warn!(url = %self.url, error = %message, "Rejected crawl request");
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": message }))).into_response()
            }
            // Ours: log the details, send back nothing internal
            CrawlError::Unexpected(e) => {
                error!(url = %self.url, error = %e, "Crawl failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Alt Text Checker API is running! Use /check or /stream with a ?url= parameter."
    }))
}

// Runs a full crawl and returns {"url": .., "results": [..]}
pub async fn check_site(
    State(state): State<AppState>,
    Query(params): Query<CrawlParams>,
) -> Result<Json<Value>, ApiError> {
    let depth = params.depth.unwrap_or(state.max_depth);
    let fetcher = state.fetcher.clone();
    let url = params.url.clone();

    // Run on its own task: a panic inside the crawl becomes a 500 instead
    // of tearing down the connection
    let joined = tokio::spawn(async move { crawl_batch(&fetcher, &url, depth).await }).await;

    match crawl_task_outcome(joined) {
        Ok(results) => Ok(Json(json!({ "url": params.url, "results": results }))),
        Err(error) => Err(ApiError {
            url: params.url,
            error,
        }),
    }
}

// Folds a failed crawl task (panic or cancel) into CrawlError::Unexpected
fn crawl_task_outcome<T>(
    joined: Result<Result<T, CrawlError>, JoinError>,
) -> Result<T, CrawlError> {
    match joined {
        Ok(result) => result,
        Err(join_error) => Err(CrawlError::Unexpected(anyhow::anyhow!(
            "crawl task failed: {}",
            join_error
        ))),
    }
}

// Streams each finding as it's produced
//
// Frames look like:
//   data: {"type":"result","result":{...finding...}}
//   data: DONE
pub async fn stream_site(
    State(state): State<AppState>,
    Query(params): Query<CrawlParams>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let depth = params.depth.unwrap_or(state.max_depth);

    // Validation happens here, so a bad URL is a 400 and not an empty stream
    let events = crawl_stream(state.fetcher.clone(), &params.url, depth).map_err(|error| {
        ApiError {
            url: params.url.clone(),
            error,
        }
    })?;

    let frames = events.map(|event| Ok::<_, Infallible>(sse_frame(&event)));

    Ok(Sse::new(frames).keep_alive(KeepAlive::default()))
}

fn sse_frame(event: &CrawlEvent) -> Event {
    match event {
        CrawlEvent::Finding(finding) => Event::default().data(result_payload(finding)),
        CrawlEvent::Done => Event::default().data("DONE"),
    }
}

fn result_payload(finding: &ImageFinding) -> String {
    json!({ "type": "result", "result": finding }).to_string()
}
