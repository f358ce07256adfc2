use axum::{
  extract::{Path, Query, State},
  response::Json,
};
use serde_json::Value;
use tracing::debug;

use super::{param, Params};
use crate::server::error::{ProxyError, PARLIAMENT_API_ERROR};
use crate::server::AppState;
use crate::upstream::{MembersApi, QueryParams};
use crate::validation::{
  validate_current_flag, validate_int, validate_member_id, validate_string, HOUSE_FILTER, MEMBER_NAME, SKIP, TAKE,
};

/// GET /api/members - member search by name
pub async fn members(State(state): State<AppState>, Query(params): Query<Params>) -> Result<Json<Value>, ProxyError> {
  let upstream_query = members_query(&params)?;

  let data = state
    .members
    .get("Members/Search", &upstream_query)
    .await
    .map_err(|e| ProxyError::upstream(e, PARLIAMENT_API_ERROR, "fetch members"))?;
  Ok(Json(data))
}

/// GET /api/member/{id} - one member with contact details and synopsis
pub async fn member(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>, ProxyError> {
  let id = validate_member_id(Some(&id))?;

  let api = MembersApi::new(state.members.clone());
  match api.member_detail_value(id).await {
    Ok(detail) => Ok(Json(detail)),
    Err(e) if e.status.is_some() => {
      debug!(member_id = id, error = %e, "member lookup failed");
      Err(ProxyError::NotFound("Member not found".to_string()))
    }
    Err(e) => Err(ProxyError::upstream(e, PARLIAMENT_API_ERROR, "fetch member")),
  }
}

pub(crate) fn members_query(params: &Params) -> Result<QueryParams, ProxyError> {
  let name = validate_string(param(params, "name"), MEMBER_NAME)?;
  let skip = validate_int(param(params, "skip"), SKIP)?.unwrap_or_default();
  let take = validate_int(param(params, "take"), TAKE)?.unwrap_or_default();
  let house = validate_string(param(params, "house"), HOUSE_FILTER)?;
  let current = validate_current_flag(param(params, "current"));

  let mut upstream = vec![
    ("skip".to_string(), skip.to_string()),
    ("take".to_string(), take.to_string()),
    ("IsCurrentMember".to_string(), current.to_string()),
  ];
  if let Some(name) = name {
    upstream.push(("Name".to_string(), name));
  }
  if let Some(house) = house {
    upstream.push(("House".to_string(), house));
  }
  Ok(upstream)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(pairs: &[(&str, &str)]) -> Params {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn test_members_query_current_flag() {
    let query = members_query(&params(&[("name", "Abbott")])).unwrap();
    assert!(query.contains(&("IsCurrentMember".to_string(), "true".to_string())));
    assert!(query.contains(&("Name".to_string(), "Abbott".to_string())));

    let query = members_query(&params(&[("current", "false")])).unwrap();
    assert!(query.contains(&("IsCurrentMember".to_string(), "false".to_string())));

    let query = members_query(&params(&[("current", "no")])).unwrap();
    assert!(query.contains(&("IsCurrentMember".to_string(), "true".to_string())));
  }

  #[test]
  fn test_members_query_rejects_bad_input() {
    assert!(members_query(&params(&[("skip", "-1")])).is_err());
    assert!(members_query(&params(&[("house", "a house name far too long")])).is_err());
  }
}
