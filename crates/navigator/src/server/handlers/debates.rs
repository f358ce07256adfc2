use axum::{
  extract::{Query, State},
  response::Json,
};
use serde_json::Value;

use super::{param, Params};
use crate::error::ValidationError;
use crate::models::House;
use crate::server::error::{ProxyError, HANSARD_API_ERROR};
use crate::server::AppState;
use crate::upstream::query;
use crate::validation::{validate_date, validate_house, validate_string, SECTION};

/// GET /api/debates - the day's debate overview for one house
pub async fn debates(State(state): State<AppState>, Query(params): Query<Params>) -> Result<Json<Value>, ProxyError> {
  let date = validate_date(param(&params, "date"), false)?
    .ok_or_else(|| ValidationError::new("date parameter required (YYYY-MM-DD)"))?;
  let house = validate_house(param(&params, "house"), House::Commons)?;
  let section = validate_string(param(&params, "section"), SECTION)?;

  let mut data = state
    .hansard
    .get("overview/day.json", &query([("date", date.to_string()), ("house", house.to_string())]))
    .await
    .map_err(|e| ProxyError::upstream(e, HANSARD_API_ERROR, "fetch debates"))?;

  if let Some(section) = section {
    retain_sections(&mut data, &section);
  }
  Ok(Json(data))
}

/// Keep only sections whose `Type` contains `section`, ignoring case
fn retain_sections(data: &mut Value, section: &str) {
  let needle = section.to_lowercase();
  if let Some(sections) = data.get_mut("Sections").and_then(Value::as_array_mut) {
    sections.retain(|entry| {
      entry
        .get("Type")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.to_lowercase().contains(&needle))
    });
  }
}
