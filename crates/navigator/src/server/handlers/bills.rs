use axum::{
  extract::{Query, State},
  response::Json,
};
use serde_json::Value;

use super::{param, Params};
use crate::server::error::{ProxyError, BILLS_API_ERROR};
use crate::server::AppState;
use crate::upstream::QueryParams;
use crate::validation::{validate_int, validate_string, SortOrder, HOUSE_FILTER, SEARCH_TERM, SKIP, TAKE};

/// GET /api/bills - bill listing, optionally filtered and sorted
pub async fn bills(State(state): State<AppState>, Query(params): Query<Params>) -> Result<Json<Value>, ProxyError> {
  let upstream_query = bills_query(&params)?;

  let data = state
    .bills
    .get("Bills", &upstream_query)
    .await
    .map_err(|e| ProxyError::upstream(e, BILLS_API_ERROR, "fetch bills"))?;
  Ok(Json(data))
}

pub(crate) fn bills_query(params: &Params) -> Result<QueryParams, ProxyError> {
  let search = validate_string(param(params, "search"), SEARCH_TERM)?;
  let skip = validate_int(param(params, "skip"), SKIP)?.unwrap_or_default();
  let take = validate_int(param(params, "take"), TAKE)?.unwrap_or_default();
  let house = validate_string(param(params, "house"), HOUSE_FILTER)?;
  let sort = SortOrder::from_param(param(params, "sort"));

  let mut upstream = vec![
    ("Skip".to_string(), skip.to_string()),
    ("Take".to_string(), take.to_string()),
    ("SortOrder".to_string(), sort.to_string()),
  ];
  if let Some(search) = search {
    upstream.push(("SearchTerm".to_string(), search));
  }
  if let Some(house) = house {
    upstream.push(("CurrentHouse".to_string(), house));
  }
  Ok(upstream)
}
