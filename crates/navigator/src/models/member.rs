use serde::{Deserialize, Serialize};

use super::House;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub abbreviation: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub background_colour: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseMembership {
  /// Constituency for MPs, peerage title for Lords
  pub membership_from: String,
  /// 1 = Commons, 2 = Lords
  pub house: u8,
  #[serde(default)]
  pub membership_start_date: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub membership_end_date: Option<String>,
}

impl HouseMembership {
  pub fn house(&self) -> Option<House> {
    House::from_code(self.house)
  }

  /// One-line description, e.g. `MP for Holborn and St Pancras`
  pub fn summary(&self) -> String {
    match self.house() {
      Some(House::Commons) => format!("MP for {}", self.membership_from),
      _ => self.membership_from.clone(),
    }
  }
}

/// Member record as returned under `value` by the Members API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
  pub id: u32,
  #[serde(default)]
  pub name_list_as: Option<String>,
  pub name_display_as: String,
  #[serde(default)]
  pub name_full_title: Option<String>,
  #[serde(default)]
  pub latest_party: Option<Party>,
  #[serde(default)]
  pub latest_house_membership: Option<HouseMembership>,
  #[serde(default)]
  pub gender: Option<String>,
  #[serde(default)]
  pub thumbnail_url: Option<String>,
}

/// Member plus the optional contact and synopsis lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDetail {
  #[serde(flatten)]
  pub member: Member,
  pub contact: Option<serde_json::Value>,
  /// Upstream HTML
  pub synopsis: Option<String>,
}

/// A tracked member, persisted in the watchlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistMember {
  pub id: u32,
  pub name_display_as: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latest_party: Option<Party>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latest_house_membership: Option<HouseMembership>,
}

impl From<&Member> for WatchlistMember {
  fn from(member: &Member) -> Self {
    Self {
      id: member.id,
      name_display_as: member.name_display_as.clone(),
      latest_party: member.latest_party.clone(),
      latest_house_membership: member.latest_house_membership.clone(),
    }
  }
}

impl From<Member> for WatchlistMember {
  fn from(member: Member) -> Self {
    Self {
      id: member.id,
      name_display_as: member.name_display_as,
      latest_party: member.latest_party,
      latest_house_membership: member.latest_house_membership,
    }
  }
}
