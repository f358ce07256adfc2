use std::sync::Arc;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::upstream::UpstreamClient;

/// Upstream clients shared by every request
#[derive(Clone)]
pub struct AppState {
  pub hansard: Arc<dyn UpstreamClient>,
  pub members: Arc<dyn UpstreamClient>,
  pub bills: Arc<dyn UpstreamClient>,
}

impl AppState {
  pub fn new(
    hansard: Arc<dyn UpstreamClient>,
    members: Arc<dyn UpstreamClient>,
    bills: Arc<dyn UpstreamClient>,
  ) -> Self {
    Self { hansard, members, bills }
  }

  /// reqwest-backed clients for the configured base URLs
  pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
    Ok(Self::new(
      Arc::new(config.hansard_client()?),
      Arc::new(config.members_client()?),
      Arc::new(config.bills_client()?),
    ))
  }
}
