use uuid::Uuid;

use super::{dedupe_by, read_collection, write_collection, KeyValueStore};
use crate::error::ValidationError;
use crate::models::{TopicGroup, TopicUpdate};

pub const TOPICS_KEY: &str = "parliament-navigator-topics";

/// Topics offered on first run
pub fn default_topics() -> Vec<TopicGroup> {
  vec![
    topic(
      "1",
      "Climate & Environment",
      &["climate change", "net zero", "carbon emissions", "renewable energy", "biodiversity"],
    ),
    topic("2", "Healthcare", &["NHS", "healthcare", "mental health", "hospitals", "doctors"]),
    topic(
      "3",
      "Economy",
      &["inflation", "interest rates", "cost of living", "GDP", "unemployment"],
    ),
  ]
}

fn topic(id: &str, name: &str, keywords: &[&str]) -> TopicGroup {
  TopicGroup {
    id: id.to_string(),
    name: name.to_string(),
    keywords: keywords.iter().map(|k| k.to_string()).collect(),
  }
}

/// The user's topic groups, persisted under [`TOPICS_KEY`]
pub struct TopicGroups<S> {
  store: S,
  topics: Vec<TopicGroup>,
}

impl<S: KeyValueStore> TopicGroups<S> {
  /// Load stored topics; nothing stored or unreadable data gives an empty set
  pub fn load(store: S) -> Self {
    let topics = read_collection(&store, TOPICS_KEY).unwrap_or_default();
    Self::from_loaded(store, topics)
  }

  /// Like [`TopicGroups::load`], but a store that has never held topics is
  /// seeded with [`default_topics`]
  pub fn load_or_seed(store: S) -> Self {
    match read_collection(&store, TOPICS_KEY) {
      Some(topics) => Self::from_loaded(store, topics),
      None => {
        let groups = Self { store, topics: default_topics() };
        groups.save();
        groups
      }
    }
  }

  fn from_loaded(store: S, topics: Vec<TopicGroup>) -> Self {
    let topics = dedupe_by(topics, |topic: &TopicGroup| topic.id.clone());
    Self { store, topics }
  }

  pub fn list(&self) -> &[TopicGroup] {
    &self.topics
  }

  pub fn get(&self, id: &str) -> Option<&TopicGroup> {
    self.topics.iter().find(|topic| topic.id == id)
  }

  pub fn add(&mut self, name: &str, keywords: &[String]) -> Result<&TopicGroup, ValidationError> {
    let mut id = Uuid::new_v4().to_string();
    while self.get(&id).is_some() {
      id = Uuid::new_v4().to_string();
    }

    let topic = TopicGroup::with_id(id, name, keywords)?;
    self.topics.push(topic);
    self.save();
    Ok(&self.topics[self.topics.len() - 1])
  }

  /// Edit a topic in place. `Ok(None)` when no topic has this id.
  pub fn update(&mut self, id: &str, changes: TopicUpdate) -> Result<Option<&TopicGroup>, ValidationError> {
    let Some(index) = self.topics.iter().position(|topic| topic.id == id) else {
      return Ok(None);
    };

    self.topics[index].apply(changes)?;
    self.save();
    Ok(Some(&self.topics[index]))
  }

  /// Remove a topic, returning whether it existed
  pub fn delete(&mut self, id: &str) -> bool {
    let before = self.topics.len();
    self.topics.retain(|topic| topic.id != id);
    let removed = self.topics.len() != before;
    if removed {
      self.save();
    }
    removed
  }

  fn save(&self) {
    write_collection(&self.store, TOPICS_KEY, &self.topics);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;
  use std::sync::Arc;

  fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  #[test]
  fn test_first_run_seeds_defaults() {
    let store = Arc::new(MemoryStore::new());
    let topics = TopicGroups::load_or_seed(store.clone());

    let names: Vec<&str> = topics.list().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Climate & Environment", "Healthcare", "Economy"]);
    assert!(store.get(TOPICS_KEY).unwrap().is_some());
  }

  #[test]
  fn test_emptied_store_is_not_reseeded() {
    let topics = TopicGroups::load_or_seed(MemoryStore::with_value(TOPICS_KEY, "[]"));
    assert!(topics.list().is_empty());
  }

  #[test]
  fn test_corrupted_value_loads_empty() {
    let topics = TopicGroups::load_or_seed(MemoryStore::with_value(TOPICS_KEY, "{\"oops\":"));
    assert!(topics.list().is_empty());

    let topics = TopicGroups::load(MemoryStore::with_value(TOPICS_KEY, "42"));
    assert!(topics.list().is_empty());
  }

  #[test]
  fn test_duplicate_ids_are_dropped_on_load() {
    let raw = r#"[
      {"id":"a","name":"First","keywords":["x"]},
      {"id":"a","name":"Second","keywords":["y"]}
    ]"#;
    let topics = TopicGroups::load(MemoryStore::with_value(TOPICS_KEY, raw));
    assert_eq!(topics.list().len(), 1);
    assert_eq!(topics.list()[0].name, "First");
  }

  #[test]
  fn test_mutations_are_persisted() {
    let store = Arc::new(MemoryStore::new());
    let mut topics = TopicGroups::load(store.clone());

    let id = topics.add("Housing", &strings(&["rent", " ", "RENT", "mortgages"])).unwrap().id.clone();
    assert_eq!(topics.get(&id).unwrap().keywords, strings(&["rent", "mortgages"]));

    let update = TopicUpdate { name: Some("Homes".to_string()), keywords: None };
    assert_eq!(topics.update(&id, update).unwrap().unwrap().name, "Homes");

    let reloaded = TopicGroups::load(store.clone());
    assert_eq!(reloaded.get(&id).unwrap().name, "Homes");

    assert!(topics.delete(&id));
    assert!(!topics.delete(&id));
    assert!(TopicGroups::load(store).list().is_empty());
  }

  #[test]
  fn test_invalid_add_and_unknown_update() {
    let mut topics = TopicGroups::load(MemoryStore::new());

    assert!(topics.add("  ", &strings(&["x"])).is_err());
    assert!(topics.add("Name", &[]).is_err());
    assert!(topics.list().is_empty());

    assert_eq!(topics.update("missing", TopicUpdate::default()).unwrap(), None);
  }
}
