//! Mapping of library errors onto HTTP responses

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::warn;

use super::types::ErrorBody;
use crate::error::{UpstreamError, ValidationError};

pub const HANSARD_API_ERROR: &str = "Hansard API error";
pub const PARLIAMENT_API_ERROR: &str = "Parliament API error";
pub const BILLS_API_ERROR: &str = "Bills API error";

#[derive(Error, Debug)]
pub enum ProxyError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// Upstream answered with a failure status; relayed with a generic message
  #[error("{message}")]
  Upstream { status: u16, message: &'static str },

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Internal(String),
}

impl ProxyError {
  /// Relay an upstream failure. `action` completes "Failed to ..." for
  /// transport failures.
  pub fn upstream(err: UpstreamError, generic: &'static str, action: &str) -> Self {
    match err.status {
      Some(status) => Self::Upstream { status, message: generic },
      None => Self::Internal(format!("Failed to {action}: {}", err.message)),
    }
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
      ProxyError::Upstream { status, .. } => StatusCode::from_u16(*status)
        .ok()
        .filter(|code| code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY),
      ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
      ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ProxyError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    if status.is_server_error() {
      warn!(%status, error = %self, "proxy request failed");
    }
    (status, Json(ErrorBody { error: self.to_string() })).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_upstream_status_is_relayed_with_generic_message() {
    let err = ProxyError::upstream(UpstreamError::status(503, "details"), HANSARD_API_ERROR, "search");
    assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(err.to_string(), "Hansard API error");
  }

  #[test]
  fn test_transport_failure_is_internal() {
    let err = ProxyError::upstream(UpstreamError::transport("timed out"), BILLS_API_ERROR, "fetch bills");
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "Failed to fetch bills: timed out");
  }

  #[test]
  fn test_validation_is_bad_request() {
    let err = ProxyError::from(ValidationError::new("Invalid integer value"));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
  }
}
