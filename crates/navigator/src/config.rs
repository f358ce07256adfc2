//! Runtime configuration shared by the CLI and the proxy service

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::UpstreamError;
use crate::upstream::{HansardApi, HttpUpstream, MembersApi};

pub const DEFAULT_HANSARD_URL: &str = "https://hansard-api.parliament.uk";
pub const DEFAULT_MEMBERS_URL: &str = "https://members-api.parliament.uk/api";
pub const DEFAULT_BILLS_URL: &str = "https://bills-api.parliament.uk/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Overrides the local data directory
pub const DATA_DIR_ENV: &str = "NAVIGATOR_DATA_DIR";
const DATA_DIR_NAME: &str = ".parliament-navigator";

/// Where the upstream APIs live and how long to wait for them
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
  /// Hansard debates API base URL
  #[arg(long, env = "NAVIGATOR_HANSARD_URL", default_value = DEFAULT_HANSARD_URL)]
  pub hansard_url: String,

  /// Parliament Members API base URL
  #[arg(long, env = "NAVIGATOR_MEMBERS_URL", default_value = DEFAULT_MEMBERS_URL)]
  pub members_url: String,

  /// Parliament Bills API base URL
  #[arg(long, env = "NAVIGATOR_BILLS_URL", default_value = DEFAULT_BILLS_URL)]
  pub bills_url: String,

  /// Per-request timeout in seconds
  #[arg(long, env = "NAVIGATOR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
  pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
  fn default() -> Self {
    Self {
      hansard_url: DEFAULT_HANSARD_URL.to_string(),
      members_url: DEFAULT_MEMBERS_URL.to_string(),
      bills_url: DEFAULT_BILLS_URL.to_string(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
    }
  }
}

impl UpstreamConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }

  pub fn hansard_client(&self) -> Result<HttpUpstream, UpstreamError> {
    HttpUpstream::new(&self.hansard_url, self.timeout())
  }

  pub fn members_client(&self) -> Result<HttpUpstream, UpstreamError> {
    HttpUpstream::new(&self.members_url, self.timeout())
  }

  pub fn bills_client(&self) -> Result<HttpUpstream, UpstreamError> {
    HttpUpstream::new(&self.bills_url, self.timeout())
  }

  pub fn hansard_api(&self) -> Result<HansardApi<Arc<HttpUpstream>>, UpstreamError> {
    Ok(HansardApi::new(Arc::new(self.hansard_client()?)))
  }

  pub fn members_api(&self) -> Result<MembersApi<Arc<HttpUpstream>>, UpstreamError> {
    Ok(MembersApi::new(Arc::new(self.members_client()?)))
  }
}

/// Directory holding the watchlist and topic files.
///
/// `NAVIGATOR_DATA_DIR` wins; otherwise `~/.parliament-navigator`, or the
/// working directory when no home directory is known.
pub fn data_dir() -> PathBuf {
  if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
    return PathBuf::from(dir);
  }
  dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(DATA_DIR_NAME)
}
