//! Response bodies produced by the proxy itself

use serde::{Deserialize, Serialize};

/// Body of every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}

/// Response for /status
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
}
