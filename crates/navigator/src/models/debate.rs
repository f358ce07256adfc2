use serde::{Deserialize, Serialize};

use super::House;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DebateOverview {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub date: Option<String>,
  #[serde(default)]
  pub house: House,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub sitting_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebateItemType {
  Contribution,
  Procedural,
  Division,
  Time,
  #[serde(other)]
  Other,
}

/// One entry of a debate transcript. `value` carries upstream HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DebateItem {
  #[serde(default)]
  pub id: Option<String>,
  pub item_type: DebateItemType,
  #[serde(default)]
  pub value: Option<String>,
  #[serde(default)]
  pub attributed_to: Option<String>,
  #[serde(default)]
  pub member_id: Option<u32>,
  #[serde(default)]
  pub member_party: Option<String>,
  #[serde(default)]
  pub member_constituency: Option<String>,
  #[serde(default)]
  pub timecode: Option<String>,
  #[serde(default)]
  pub order_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Debate {
  pub overview: DebateOverview,
  #[serde(default)]
  pub items: Vec<DebateItem>,
}

/// A spoken contribution by one member, as returned by the contributions search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContributionResult {
  #[serde(rename = "DebateSectionExtId", default)]
  pub debate_id: String,
  #[serde(default)]
  pub debate_section: String,
  #[serde(default)]
  pub sitting_date: Option<String>,
  #[serde(default)]
  pub house: Option<String>,
  #[serde(default)]
  pub text_highlight: Option<String>,
  #[serde(default)]
  pub attributed_to: Option<String>,
}
