//! Typed access to the Parliament Members API

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::{decode, UpstreamClient};
use crate::error::UpstreamError;
use crate::models::{Member, MemberDetail};

pub const DEFAULT_MEMBER_SEARCH_TAKE: u32 = 20;
const THUMBNAIL_BASE: &str = "https://members-api.parliament.uk/api/Members";
const UNKNOWN_PARTY_COLOR: &str = "#808080";

/// Party branding colours, matched by case-insensitive substring
const PARTY_COLORS: &[(&str, &str)] = &[
  ("labour", "#E4003B"),
  ("conservative", "#0087DC"),
  ("liberal democrat", "#FAA61A"),
  ("green", "#6AB023"),
  ("scottish national", "#FDF38E"),
  ("snp", "#FDF38E"),
  ("plaid", "#005B54"),
  ("dup", "#D46A4C"),
  ("sinn", "#326760"),
];

#[derive(Deserialize)]
struct ValueEnvelope<T> {
  value: T,
}

#[derive(Deserialize)]
struct SearchEnvelope {
  #[serde(default)]
  items: Vec<ValueEnvelope<Member>>,
}

/// Members endpoints over any [`UpstreamClient`]
pub struct MembersApi<C> {
  client: C,
}

impl<C: UpstreamClient> MembersApi<C> {
  pub fn new(client: C) -> Self {
    Self { client }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  /// Current members whose name matches `name`
  pub async fn search_members(&self, name: &str, take: u32) -> Result<Vec<Member>, UpstreamError> {
    let params = vec![
      ("Name".to_string(), name.to_string()),
      ("take".to_string(), take.to_string()),
      ("IsCurrentMember".to_string(), "true".to_string()),
    ];
    let response = self.client.get("Members/Search", &params).await?;
    let envelope: SearchEnvelope = decode(response)?;
    Ok(envelope.items.into_iter().map(|item| item.value).collect())
  }

  pub async fn member(&self, id: u32) -> Result<Member, UpstreamError> {
    let response = self.client.get(&format!("Members/{id}"), &[]).await?;
    let envelope: ValueEnvelope<Member> = decode(response)?;
    Ok(envelope.value)
  }

  /// Biography HTML. A failed lookup is not an error, just no synopsis.
  pub async fn member_synopsis(&self, id: u32) -> Option<String> {
    match self.client.get(&format!("Members/{id}/Synopsis"), &[]).await {
      Ok(response) => response.get("value").and_then(Value::as_str).map(str::to_string),
      Err(e) => {
        warn!(member_id = id, error = %e, "synopsis lookup failed");
        None
      }
    }
  }

  /// Member record merged with its contact list and synopsis, as raw JSON.
  ///
  /// The three lookups run concurrently. The member lookup must succeed;
  /// contact and synopsis fall back to `null`.
  pub async fn member_detail_value(&self, id: u32) -> Result<Value, UpstreamError> {
    let member_path = format!("Members/{id}");
    let contact_path = format!("Members/{id}/Contact");
    let synopsis_path = format!("Members/{id}/Synopsis");

    let (member, contact, synopsis) = futures::join!(
      self.client.get(&member_path, &[]),
      self.client.get(&contact_path, &[]),
      self.client.get(&synopsis_path, &[]),
    );

    let mut combined = match member? {
      Value::Object(map) => map,
      other => {
        let mut map = Map::new();
        map.insert("value".to_string(), other);
        map
      }
    };
    combined.insert("contact".to_string(), optional_value(id, "contact", contact));
    combined.insert("synopsis".to_string(), optional_value(id, "synopsis", synopsis));

    Ok(Value::Object(combined))
  }

  /// Typed form of [`MembersApi::member_detail_value`]
  pub async fn member_detail(&self, id: u32) -> Result<MemberDetail, UpstreamError> {
    let mut combined = self.member_detail_value(id).await?;

    let member: Member = decode(combined.get_mut("value").map(Value::take).unwrap_or(Value::Null))?;
    let contact = combined.get_mut("contact").map(Value::take).filter(|v| !v.is_null());
    let synopsis = combined.get("synopsis").and_then(Value::as_str).map(str::to_string);

    Ok(MemberDetail { member, contact, synopsis })
  }
}

fn optional_value(id: u32, what: &str, result: Result<Value, UpstreamError>) -> Value {
  match result {
    Ok(mut response) => response.get_mut("value").map(Value::take).unwrap_or(Value::Null),
    Err(e) => {
      warn!(member_id = id, error = %e, "{what} lookup failed");
      Value::Null
    }
  }
}

/// Portrait thumbnail served directly by the Members API
pub fn photo_url(member_id: u32) -> String {
  format!("{THUMBNAIL_BASE}/{member_id}/Thumbnail")
}

/// Hex colour for a party name, grey when unknown
pub fn party_color(party: Option<&str>) -> &'static str {
  let Some(party) = party else {
    return UNKNOWN_PARTY_COLOR;
  };
  let party = party.to_lowercase();
  PARTY_COLORS
    .iter()
    .find(|(key, _)| party.contains(key))
    .map(|(_, color)| *color)
    .unwrap_or(UNKNOWN_PARTY_COLOR)
}
