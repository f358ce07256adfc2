use axum::{
  extract::{Query, State},
  response::Json,
};
use serde_json::Value;

use super::{param, Params};
use crate::models::House;
use crate::server::error::{ProxyError, HANSARD_API_ERROR};
use crate::server::AppState;
use crate::upstream::QueryParams;
use crate::validation::{
  validate_date, validate_house, validate_int, validate_string, MEMBER_ID, SEARCH_QUERY, SKIP, TAKE,
};

/// GET /api/search - full-text search over debate transcripts
pub async fn search(State(state): State<AppState>, Query(params): Query<Params>) -> Result<Json<Value>, ProxyError> {
  let upstream_query = search_query(&params)?;

  let data = state
    .hansard
    .get("search.json", &upstream_query)
    .await
    .map_err(|e| ProxyError::upstream(e, HANSARD_API_ERROR, "search Hansard"))?;
  Ok(Json(data))
}

/// Validate the search parameters and translate them to Hansard's names
pub(crate) fn search_query(params: &Params) -> Result<QueryParams, ProxyError> {
  let term = param(params, "q").filter(|q| !q.trim().is_empty()).or_else(|| param(params, "query"));
  let term = validate_string(term, SEARCH_QUERY)?.unwrap_or_default();
  let start_date = validate_date(param(params, "startDate"), false)?;
  let end_date = validate_date(param(params, "endDate"), false)?;
  let member = validate_int(param(params, "member"), MEMBER_ID)?;
  let skip = validate_int(param(params, "skip"), SKIP)?.unwrap_or_default();
  let take = validate_int(param(params, "take"), TAKE)?.unwrap_or_default();
  let house = validate_house(param(params, "house"), House::Commons)?;

  let mut upstream = vec![
    ("queryParameters.searchTerm".to_string(), term),
    ("queryParameters.skip".to_string(), skip.to_string()),
    ("queryParameters.take".to_string(), take.to_string()),
    ("queryParameters.house".to_string(), house.to_string()),
  ];
  if let Some(start) = start_date {
    upstream.push(("queryParameters.startDate".to_string(), start.to_string()));
  }
  if let Some(end) = end_date {
    upstream.push(("queryParameters.endDate".to_string(), end.to_string()));
  }
  if let Some(member) = member {
    upstream.push(("queryParameters.memberId".to_string(), member.to_string()));
  }
  Ok(upstream)
}
