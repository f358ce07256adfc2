//! Typed shapes of the upstream API payloads and of locally persisted state

pub mod debate;
pub mod member;
pub mod search;
pub mod topic;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use debate::{ContributionResult, Debate, DebateItem, DebateItemType, DebateOverview};
pub use member::{HouseMembership, Member, MemberDetail, Party, WatchlistMember};
pub use search::{SearchResultRecord, SpeakerAggregate};
pub use topic::{TopicGroup, TopicUpdate};

/// A chamber of Parliament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum House {
  #[default]
  Commons,
  Lords,
}

impl House {
  pub fn as_str(&self) -> &'static str {
    match self {
      House::Commons => "Commons",
      House::Lords => "Lords",
    }
  }

  /// Members API encodes the house as 1 (Commons) or 2 (Lords)
  pub fn from_code(code: u8) -> Option<Self> {
    match code {
      1 => Some(House::Commons),
      2 => Some(House::Lords),
      _ => None,
    }
  }
}

impl fmt::Display for House {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
