//! Fetch-url endpoint handler
//!
//! `POST /fetch-url` takes `{ "url": "<absolute url>" }`, runs the
//! extraction pipeline, and answers with the assembled document plus
//! metadata. Validation and upstream failures come back as
//! `400 {"error": ...}`, anything unexpected as `500`.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use metrics::{counter, histogram};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ExtractError;
use crate::pipeline::{ExtractionResult, Extractor};

/// Shared state for the extraction endpoints.
pub struct AppState {
    /// The extraction pipeline, shared across requests.
    pub extractor: Extractor,
}

impl AppState {
    /// Wrap an extractor for use as router state.
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor }
    }
}

/// Request body for `POST /fetch-url`.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchUrlRequest {
    /// The URL to fetch and extract.
    pub url: String,
}

/// Handle `POST /fetch-url`.
#[instrument(skip(state, request), fields(url = %request.url))]
pub async fn fetch_url_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FetchUrlRequest>,
) -> Result<Json<ExtractionResult>, ExtractError> {
    let start = Instant::now();

    let result = state.extractor.extract(&request.url).await?;

    let elapsed = start.elapsed();
    counter!("extractions_total").increment(1);
    histogram!("extraction_duration_seconds").record(elapsed.as_secs_f64());
    histogram!("extraction_content_chars").record(result.content.chars().count() as f64);

    info!(
        url = %result.url,
        content_len = result.content.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "fetch-url request served"
    );

    Ok(Json(result))
}

/// Health check for the extraction service.
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sourcefetch",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Build the router with all extraction endpoints.
pub fn extract_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/fetch-url", post(fetch_url_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
