//! Error taxonomy shared by the library, the proxy service and the CLI

use thiserror::Error;

/// Caller supplied a malformed parameter. Always recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
  pub message: String,
}

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

/// A remote API answered with a non-success status, or the request never
/// produced a usable response (network failure, timeout, undecodable body).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UpstreamError {
  /// Upstream HTTP status, absent for transport failures
  pub status: Option<u16>,
  pub message: String,
}

impl UpstreamError {
  pub fn status(status: u16, message: impl Into<String>) -> Self {
    Self { status: Some(status), message: message.into() }
  }

  pub fn transport(message: impl Into<String>) -> Self {
    Self { status: None, message: message.into() }
  }

  pub fn is_not_found(&self) -> bool {
    self.status == Some(404)
  }
}

impl From<reqwest::Error> for UpstreamError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      return Self::transport(format!("request timed out: {err}"));
    }
    match err.status() {
      Some(status) => Self::status(status.as_u16(), err.to_string()),
      None => Self::transport(err.to_string()),
    }
  }
}

/// Local storage could not be read or written. Never surfaced to the user;
/// collections recover by falling back to an empty set.
#[derive(Error, Debug)]
pub enum PersistenceError {
  #[error("storage I/O failed: {0}")]
  Io(#[from] std::io::Error),

  #[error("stored value is not valid JSON: {0}")]
  Corrupt(#[from] serde_json::Error),

  #[error("storage unavailable: {message}")]
  Unavailable { message: String },
}

impl PersistenceError {
  pub fn unavailable(message: impl Into<String>) -> Self {
    Self::Unavailable { message: message.into() }
  }
}
