use serde::{Deserialize, Serialize};

use super::House;

/// One hit from the Hansard search endpoints. Speaker fields are only present
/// when the hit is attributed to a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResultRecord {
  #[serde(rename = "DebateSectionExtId", default)]
  pub id: String,

  #[serde(default)]
  pub title: String,

  #[serde(rename = "DebateSection", default)]
  pub section: Option<String>,

  #[serde(default)]
  pub sitting_date: Option<String>,

  #[serde(default)]
  pub house: House,

  #[serde(rename = "AttributedTo", default)]
  pub speaker_name: Option<String>,

  #[serde(rename = "MemberId", default)]
  pub speaker_id: Option<u32>,

  #[serde(rename = "MemberParty", default)]
  pub speaker_party: Option<String>,

  #[serde(rename = "MemberConstituency", default)]
  pub speaker_constituency: Option<String>,

  #[serde(rename = "TextHighlight", default)]
  pub text_highlight: Option<String>,
}

impl SearchResultRecord {
  /// Aggregation key. Upstream sends `0` for unattributed text, which is
  /// treated the same as a missing id.
  pub fn speaker_key(&self) -> Option<u32> {
    self.speaker_id.filter(|id| *id != 0)
  }

  /// Date part of the sitting timestamp (`2024-03-12T00:00:00` -> `2024-03-12`)
  pub fn sitting_day(&self) -> Option<&str> {
    self
      .sitting_date
      .as_deref()
      .and_then(|date| date.split('T').next())
      .filter(|day| !day.is_empty())
  }
}

/// Running tally of one speaker's appearances within a single aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerAggregate {
  pub id: u32,
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub party: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub constituency: Option<String>,
  pub count: usize,
}
