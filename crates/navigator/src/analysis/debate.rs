use std::collections::BTreeMap;

use crate::models::{DebateItem, SearchResultRecord};

/// Group key for records without a sitting date
pub const UNKNOWN_DATE: &str = "Unknown";

/// Debate items matching an optional text filter and an optional speaker.
///
/// The term matches case-insensitively against the item text or the
/// attributed speaker name. A blank term filters nothing.
pub fn filter_items<'a>(items: &'a [DebateItem], term: Option<&str>, speaker: Option<u32>) -> Vec<&'a DebateItem> {
  let needle = term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_lowercase);

  items
    .iter()
    .filter(|item| speaker.map_or(true, |id| item.member_id == Some(id)))
    .filter(|item| match &needle {
      None => true,
      Some(needle) => [&item.value, &item.attributed_to]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(needle.as_str())),
    })
    .collect()
}

/// Search records bucketed by sitting day, preserving record order inside each day
pub fn group_by_date(records: &[SearchResultRecord]) -> BTreeMap<String, Vec<&SearchResultRecord>> {
  let mut groups: BTreeMap<String, Vec<&SearchResultRecord>> = BTreeMap::new();
  for record in records {
    let day = record.sitting_day().unwrap_or(UNKNOWN_DATE);
    groups.entry(day.to_string()).or_default().push(record);
  }
  groups
}

/// Group keys newest first, with `Unknown` last
pub fn sorted_dates_descending<V>(groups: &BTreeMap<String, V>) -> Vec<&str> {
  let mut dates: Vec<&str> = groups.keys().map(String::as_str).filter(|d| *d != UNKNOWN_DATE).collect();
  dates.reverse();
  if groups.contains_key(UNKNOWN_DATE) {
    dates.push(UNKNOWN_DATE);
  }
  dates
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{DebateItemType, House};

  fn item(member_id: Option<u32>, speaker: Option<&str>, text: &str) -> DebateItem {
    DebateItem {
      id: None,
      item_type: DebateItemType::Contribution,
      value: Some(text.to_string()),
      attributed_to: speaker.map(str::to_string),
      member_id,
      member_party: None,
      member_constituency: None,
      timecode: None,
      order_index: None,
    }
  }

  fn record(id: &str, sitting_date: Option<&str>) -> SearchResultRecord {
    SearchResultRecord {
      id: id.to_string(),
      title: "Debate".to_string(),
      section: None,
      sitting_date: sitting_date.map(str::to_string),
      house: House::Commons,
      speaker_name: None,
      speaker_id: None,
      speaker_party: None,
      speaker_constituency: None,
      text_highlight: None,
    }
  }

  #[test]
  fn test_filter_items_by_term_and_speaker() {
    let items = vec![
      item(Some(1), Some("Rishi Sunak"), "<p>The NHS is improving</p>"),
      item(Some(2), Some("Keir Starmer"), "<p>Waiting lists grow</p>"),
      item(Some(1), Some("Rishi Sunak"), "<p>Inflation has halved</p>"),
    ];

    assert_eq!(filter_items(&items, None, None).len(), 3);
    assert_eq!(filter_items(&items, Some("nhs"), None).len(), 1);
    assert_eq!(filter_items(&items, Some("STARMER"), None).len(), 1);
    assert_eq!(filter_items(&items, None, Some(1)).len(), 2);
    assert_eq!(filter_items(&items, Some("inflation"), Some(2)).len(), 0);
    assert_eq!(filter_items(&items, Some("   "), None).len(), 3);
  }

  #[test]
  fn test_group_by_date_newest_first() {
    let records = vec![
      record("a", Some("2024-01-10T00:00:00")),
      record("b", None),
      record("c", Some("2024-03-02T00:00:00")),
      record("d", Some("2024-01-10T00:00:00")),
    ];

    let groups = group_by_date(&records);
    assert_eq!(groups["2024-01-10"].iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["a", "d"]);
    assert_eq!(sorted_dates_descending(&groups), vec!["2024-03-02", "2024-01-10", "Unknown"]);
  }
}
