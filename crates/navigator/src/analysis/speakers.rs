//! Speaker de-duplication and ranking

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{DebateItem, DebateItemType, SearchResultRecord, SpeakerAggregate};

const UNKNOWN_SPEAKER: &str = "Unknown";

/// Count how often each member appears in `records`, most frequent first.
///
/// Records without a speaker id cannot be keyed and are skipped. The first
/// record seen for a speaker supplies its name, party and constituency. Equal
/// counts keep first-encounter order.
pub fn aggregate<'a, I>(records: I) -> Vec<SpeakerAggregate>
where
  I: IntoIterator<Item = &'a SearchResultRecord>,
{
  let mut slots: HashMap<u32, usize> = HashMap::new();
  let mut speakers: Vec<SpeakerAggregate> = Vec::new();

  for record in records {
    let Some(id) = record.speaker_key() else {
      continue;
    };

    let slot = *slots.entry(id).or_insert_with(|| {
      speakers.push(SpeakerAggregate {
        id,
        name: record.speaker_name.clone().unwrap_or_else(|| UNKNOWN_SPEAKER.to_string()),
        party: record.speaker_party.clone(),
        constituency: record.speaker_constituency.clone(),
        count: 0,
      });
      speakers.len() - 1
    });
    speakers[slot].count += 1;
  }

  // stable: ties stay in encounter order
  speakers.sort_by(|a, b| b.count.cmp(&a.count));
  speakers
}

/// A speaker in a single debate transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebateSpeaker {
  pub id: Option<u32>,
  pub name: String,
  pub party: Option<String>,
  pub count: usize,
}

#[derive(Hash, PartialEq, Eq)]
enum SpeakerKey {
  Member(u32),
  Name(String),
}

/// Speakers of a debate, most contributions first.
///
/// Only `Contribution` items with an attributed speaker count. Speakers are
/// keyed by member id, falling back to the attributed name for contributions
/// by non-members.
pub fn extract_speakers(items: &[DebateItem]) -> Vec<DebateSpeaker> {
  let mut slots: HashMap<SpeakerKey, usize> = HashMap::new();
  let mut speakers: Vec<DebateSpeaker> = Vec::new();

  for item in items.iter().filter(|item| item.item_type == DebateItemType::Contribution) {
    let Some(name) = item.attributed_to.as_deref().filter(|name| !name.is_empty()) else {
      continue;
    };
    let member_id = item.member_id.filter(|id| *id != 0);
    let key = match member_id {
      Some(id) => SpeakerKey::Member(id),
      None => SpeakerKey::Name(name.to_string()),
    };

    let slot = *slots.entry(key).or_insert_with(|| {
      speakers.push(DebateSpeaker {
        id: member_id,
        name: name.to_string(),
        party: item.member_party.clone(),
        count: 0,
      });
      speakers.len() - 1
    });
    speakers[slot].count += 1;
  }

  speakers.sort_by(|a, b| b.count.cmp(&a.count));
  speakers
}
