//! Topic analysis: one transcript search per keyword, merged into a single
//! speaker ranking

use futures::future::try_join_all;
use std::future::Future;
use tracing::{debug, info};

use super::speakers::aggregate;
use crate::error::UpstreamError;
use crate::models::{SpeakerAggregate, TopicGroup};
use crate::upstream::{HansardApi, SearchOptions, UpstreamClient};

/// Results requested per keyword
pub const TOPIC_SEARCH_TAKE: u32 = 50;

/// Rank the members who speak most about `topic`.
///
/// All keyword searches run concurrently. The first failure fails the whole
/// analysis and drops the searches still in flight; partial results are never
/// returned.
pub async fn analyze_topic<C: UpstreamClient>(
  api: &HansardApi<C>,
  topic: &TopicGroup,
) -> Result<Vec<SpeakerAggregate>, UpstreamError> {
  if topic.keywords.is_empty() {
    return Ok(Vec::new());
  }

  let options = SearchOptions::take(TOPIC_SEARCH_TAKE);
  debug!(topic = %topic.name, keywords = topic.keywords.len(), "analyzing topic");

  let batches = try_join_all(topic.keywords.iter().map(|keyword| api.search(keyword, &options))).await?;

  let speakers = aggregate(batches.iter().flatten());
  info!(topic = %topic.name, speakers = speakers.len(), "topic analysis complete");
  Ok(speakers)
}

/// [`analyze_topic`] abandoned as soon as `cancel` resolves.
///
/// Returns `Ok(None)` when cancelled; in-flight searches are dropped.
pub async fn analyze_topic_until<C, F>(
  api: &HansardApi<C>,
  topic: &TopicGroup,
  cancel: F,
) -> Result<Option<Vec<SpeakerAggregate>>, UpstreamError>
where
  C: UpstreamClient,
  F: Future<Output = ()>,
{
  tokio::select! {
    biased;
    _ = cancel => {
      debug!(topic = %topic.name, "topic analysis cancelled");
      Ok(None)
    }
    result = analyze_topic(api, topic) => result.map(Some),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::upstream::MockUpstreamClient;
  use serde_json::{json, Value};

  fn topic(keywords: &[&str]) -> TopicGroup {
    TopicGroup {
      id: "t1".to_string(),
      name: "Test".to_string(),
      keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
  }

  fn search_term(query: &[(String, String)]) -> String {
    query
      .iter()
      .find(|(key, _)| key == "queryParameters.searchTerm")
      .map(|(_, value)| value.clone())
      .unwrap_or_default()
  }

  fn hit(member_id: u32, name: &str) -> Value {
    json!({ "DebateSectionExtId": "s", "Title": "T", "MemberId": member_id, "AttributedTo": name })
  }

  #[tokio::test]
  async fn test_analyze_topic_merges_keyword_results() {
    let mut client = MockUpstreamClient::new();
    client
      .expect_get()
      .withf(|path, query| {
        path == "search.json" && query.contains(&("queryParameters.take".to_string(), "50".to_string()))
      })
      .times(2)
      .returning(|_, query| match search_term(query).as_str() {
        "a" => Ok(json!({ "Results": [hit(1, "One"), hit(2, "Two")] })),
        _ => Ok(json!({ "Results": [hit(2, "Two"), hit(2, "Two")] })),
      });

    let api = HansardApi::new(client);
    let speakers = analyze_topic(&api, &topic(&["a", "b"])).await.unwrap();

    assert_eq!(speakers.len(), 2);
    assert_eq!((speakers[0].id, speakers[0].count), (2, 3));
    assert_eq!((speakers[1].id, speakers[1].count), (1, 1));
  }

  #[tokio::test]
  async fn test_analyze_topic_fails_when_any_keyword_fails() {
    let mut client = MockUpstreamClient::new();
    client.expect_get().returning(|_, query| match search_term(query).as_str() {
      "b" => Err(UpstreamError::status(503, "unavailable")),
      _ => Ok(json!({ "Results": [hit(1, "One")] })),
    });

    let api = HansardApi::new(client);
    let err = analyze_topic(&api, &topic(&["a", "b"])).await.unwrap_err();
    assert_eq!(err.status, Some(503));
  }

  #[tokio::test]
  async fn test_analyze_topic_without_keywords_makes_no_calls() {
    let mut client = MockUpstreamClient::new();
    client.expect_get().times(0);

    let api = HansardApi::new(client);
    assert!(analyze_topic(&api, &topic(&[])).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_analyze_topic_until_cancelled() {
    let mut client = MockUpstreamClient::new();
    client.expect_get().returning(|_, _| Ok(json!({ "Results": [] })));

    let api = HansardApi::new(client);
    let outcome = analyze_topic_until(&api, &topic(&["a"]), std::future::ready(())).await.unwrap();
    assert_eq!(outcome, None);
  }

  #[tokio::test]
  async fn test_analyze_topic_until_completes() {
    let mut client = MockUpstreamClient::new();
    client.expect_get().returning(|_, _| Ok(json!({ "Results": [hit(5, "Five")] })));

    let api = HansardApi::new(client);
    let outcome = analyze_topic_until(&api, &topic(&["a"]), std::future::pending()).await.unwrap();
    assert_eq!(outcome.map(|speakers| speakers.len()), Some(1));
  }
}
