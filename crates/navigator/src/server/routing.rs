//! Axum router configuration for all proxy endpoints

use axum::{
  http::{header, Method},
  routing::get,
  Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use super::handlers::{bills, debates, members, not_found, search, status};
use super::AppState;

/// How long browsers may cache a preflight answer
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Create the proxy router with tracing and CORS applied
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/status", get(status::status))
    .route("/api/debates", get(debates::debates))
    .route("/api/search", get(search::search))
    .route("/api/members", get(members::members))
    .route("/api/member/{id}", get(members::member))
    .route("/api/bills", get(bills::bills))
    .fallback(not_found)
    .with_state(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors_layer()))
}

/// Any origin, read-only methods, JSON bodies
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE])
    .max_age(PREFLIGHT_MAX_AGE)
}
