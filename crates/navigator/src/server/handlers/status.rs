use axum::response::Json;

use crate::server::types::StatusResponse;

/// GET /status - liveness and version
pub async fn status() -> Json<StatusResponse> {
  Json(StatusResponse { status: "healthy".to_string(), version: env!("CARGO_PKG_VERSION").to_string() })
}
