//! Route handlers, one module per upstream resource

pub mod bills;
pub mod debates;
pub mod members;
pub mod search;
pub mod status;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use std::collections::HashMap;

use super::types::ErrorBody;

/// Raw query string parameters
pub type Params = HashMap<String, String>;

pub(crate) fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
  params.get(key).map(String::as_str)
}

pub async fn not_found() -> Response {
  (StatusCode::NOT_FOUND, Json(ErrorBody { error: "Not found".to_string() })).into_response()
}
