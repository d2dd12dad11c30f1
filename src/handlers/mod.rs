//! HTTP handlers for the sourcefetch server
//!
//! Axum handlers for the extraction endpoint and health check. Transport
//! concerns beyond these routes (CORS policy, TLS termination) belong to
//! the deployment in front of this service.

pub mod extract;

pub use extract::{
    extract_router, fetch_url_handler, health_handler, AppState, FetchUrlRequest,
};
