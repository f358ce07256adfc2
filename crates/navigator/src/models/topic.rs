use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A named set of search keywords, analysed together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicGroup {
  pub id: String,
  pub name: String,
  pub keywords: Vec<String>,
}

/// Partial edit of a topic group; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct TopicUpdate {
  pub name: Option<String>,
  pub keywords: Option<Vec<String>>,
}

impl TopicGroup {
  /// Create a topic with a fresh id. The name must be non-blank and at least
  /// one keyword must survive normalization.
  pub fn new(name: &str, keywords: &[String]) -> Result<Self, ValidationError> {
    Self::with_id(Uuid::new_v4().to_string(), name, keywords)
  }

  pub fn with_id(id: String, name: &str, keywords: &[String]) -> Result<Self, ValidationError> {
    let name = validate_name(name)?;
    let keywords = validate_keywords(keywords)?;
    Ok(Self { id, name, keywords })
  }

  /// Apply an edit, leaving the topic unchanged if any field is invalid
  pub fn apply(&mut self, update: TopicUpdate) -> Result<(), ValidationError> {
    let name = update.name.as_deref().map(validate_name).transpose()?;
    let keywords = update.keywords.as_deref().map(validate_keywords).transpose()?;

    if let Some(name) = name {
      self.name = name;
    }
    if let Some(keywords) = keywords {
      self.keywords = keywords;
    }
    Ok(())
  }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
  let name = name.trim();
  if name.is_empty() {
    return Err(ValidationError::new("Topic name is required"));
  }
  Ok(name.to_string())
}

fn validate_keywords(keywords: &[String]) -> Result<Vec<String>, ValidationError> {
  let keywords = normalize_keywords(keywords);
  if keywords.is_empty() {
    return Err(ValidationError::new("At least one keyword is required"));
  }
  Ok(keywords)
}

/// Trim every keyword, drop blanks and drop case-insensitive duplicates,
/// keeping the first spelling seen
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
  let mut seen = std::collections::HashSet::new();
  keywords
    .iter()
    .map(|keyword| keyword.trim())
    .filter(|keyword| !keyword.is_empty())
    .filter(|keyword| seen.insert(keyword.to_lowercase()))
    .map(str::to_string)
    .collect()
}

/// Split a comma-separated keyword list as typed by a user
pub fn parse_keywords(text: &str) -> Vec<String> {
  normalize_keywords(&text.split(',').map(str::to_string).collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
  }

  #[test]
  fn test_normalize_keywords_drops_blanks_and_duplicates() {
    let keywords = normalize_keywords(&strings(&["  NHS ", "", "nhs", "mental health", "   "]));
    assert_eq!(keywords, strings(&["NHS", "mental health"]));
  }

  #[test]
  fn test_parse_keywords_from_comma_list() {
    assert_eq!(parse_keywords("climate change, net zero,,  "), strings(&["climate change", "net zero"]));
  }

  #[test]
  fn test_new_topic_requires_name_and_keywords() {
    assert!(TopicGroup::new("  ", &strings(&["a"])).is_err());
    assert!(TopicGroup::new("Economy", &strings(&[" ", ""])).is_err());

    let topic = TopicGroup::new(" Economy ", &strings(&["GDP"])).unwrap();
    assert_eq!(topic.name, "Economy");
    assert!(!topic.id.is_empty());
  }

  #[test]
  fn test_new_topics_get_distinct_ids() {
    let a = TopicGroup::new("A", &strings(&["x"])).unwrap();
    let b = TopicGroup::new("A", &strings(&["x"])).unwrap();
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn test_apply_is_all_or_nothing() {
    let mut topic = TopicGroup::new("Economy", &strings(&["GDP"])).unwrap();
    let result = topic.apply(TopicUpdate {
      name: Some("Money".to_string()),
      keywords: Some(strings(&[" "])),
    });

    assert!(result.is_err());
    assert_eq!(topic.name, "Economy");
    assert_eq!(topic.keywords, strings(&["GDP"]));
  }
}
