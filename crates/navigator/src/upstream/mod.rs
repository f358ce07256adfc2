//! Network-facing access to the Parliament APIs
//!
//! [`UpstreamClient`] is the single seam between the application and the
//! network: a `GET` of a resource path with query parameters, answering JSON
//! or an [`UpstreamError`]. [`HttpUpstream`] is the reqwest-backed
//! implementation; tests substitute their own.

pub mod hansard;
pub mod members;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::UpstreamError;

pub use hansard::{HansardApi, SearchOptions};
pub use members::{party_color, photo_url, MembersApi};

/// Query string as ordered key/value pairs
pub type QueryParams = Vec<(String, String)>;

/// Minimal contract every upstream REST API is reached through
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
  /// GET `resource_path` relative to the API base URL. Non-success statuses
  /// and transport failures both surface as [`UpstreamError`]. No retries.
  async fn get(&self, resource_path: &str, query: &[(String, String)]) -> Result<Value, UpstreamError>;
}

#[async_trait]
impl<T: UpstreamClient + ?Sized> UpstreamClient for Arc<T> {
  async fn get(&self, resource_path: &str, query: &[(String, String)]) -> Result<Value, UpstreamError> {
    (**self).get(resource_path, query).await
  }
}

/// reqwest-backed client bound to one API base URL
#[derive(Debug, Clone)]
pub struct HttpUpstream {
  client: Client,
  base_url: Url,
}

impl HttpUpstream {
  /// Build a client for `base_url`; every request is bounded by `timeout`
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
    let base_url = Url::parse(base_url)
      .map_err(|e| UpstreamError::transport(format!("invalid base URL '{base_url}': {e}")))?;

    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("parliament-navigator/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self { client, base_url })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  fn endpoint(&self, resource_path: &str) -> Result<Url, UpstreamError> {
    let joined = format!(
      "{}/{}",
      self.base_url.as_str().trim_end_matches('/'),
      resource_path.trim_start_matches('/')
    );
    Url::parse(&joined)
      .map_err(|e| UpstreamError::transport(format!("invalid resource path '{resource_path}': {e}")))
  }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
  async fn get(&self, resource_path: &str, query: &[(String, String)]) -> Result<Value, UpstreamError> {
    let url = self.endpoint(resource_path)?;
    debug!(%url, params = query.len(), "upstream request");

    let response = self.client.get(url).query(query).send().await?;
    let status = response.status();

    if !status.is_success() {
      debug!(%status, resource_path, "upstream returned failure status");
      return Err(UpstreamError::status(
        status.as_u16(),
        format!("{resource_path} returned {status}"),
      ));
    }

    response
      .json::<Value>()
      .await
      .map_err(|e| UpstreamError::transport(format!("invalid JSON from {resource_path}: {e}")))
  }
}

/// Decode a JSON payload into a typed model
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, UpstreamError> {
  serde_json::from_value(value)
    .map_err(|e| UpstreamError::transport(format!("unexpected response shape: {e}")))
}

/// Decode the list stored under `field`, treating a missing field as empty
pub(crate) fn decode_list<T: DeserializeOwned>(mut value: Value, field: &str) -> Result<Vec<T>, UpstreamError> {
  match value.get_mut(field).map(Value::take) {
    None | Some(Value::Null) => Ok(Vec::new()),
    Some(list) => decode(list),
  }
}

/// Build a [`QueryParams`] list from borrowed pairs
pub fn query<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> QueryParams {
  pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
