//! Typed access to the Hansard debates API

use chrono::NaiveDate;

use super::{decode, decode_list, QueryParams, UpstreamClient};
use crate::error::UpstreamError;
use crate::models::{ContributionResult, Debate, House, SearchResultRecord};

pub const DEFAULT_SEARCH_TAKE: u32 = 20;
pub const DEFAULT_RECENT_TAKE: u32 = 30;
pub const DEFAULT_CONTRIBUTIONS_TAKE: u32 = 20;

/// Optional narrowing of a transcript search
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
  pub take: Option<u32>,
  pub member_id: Option<u32>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
  pub house: Option<House>,
}

impl SearchOptions {
  pub fn take(take: u32) -> Self {
    Self { take: Some(take), ..Self::default() }
  }

  fn to_query(&self, term: &str) -> QueryParams {
    let mut params = vec![
      ("queryParameters.searchTerm".to_string(), term.to_string()),
      (
        "queryParameters.take".to_string(),
        self.take.unwrap_or(DEFAULT_SEARCH_TAKE).to_string(),
      ),
    ];
    if let Some(member_id) = self.member_id {
      params.push(("queryParameters.memberId".to_string(), member_id.to_string()));
    }
    if let Some(start) = self.start_date {
      params.push(("queryParameters.startDate".to_string(), start.to_string()));
    }
    if let Some(end) = self.end_date {
      params.push(("queryParameters.endDate".to_string(), end.to_string()));
    }
    if let Some(house) = self.house {
      params.push(("queryParameters.house".to_string(), house.to_string()));
    }
    params
  }
}

/// Hansard endpoints over any [`UpstreamClient`]
pub struct HansardApi<C> {
  client: C,
}

impl<C: UpstreamClient> HansardApi<C> {
  pub fn new(client: C) -> Self {
    Self { client }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  /// Full-text search over debate transcripts
  pub async fn search(
    &self,
    term: &str,
    options: &SearchOptions,
  ) -> Result<Vec<SearchResultRecord>, UpstreamError> {
    let response = self.client.get("search.json", &options.to_query(term)).await?;
    decode_list(response, "Results")
  }

  /// Most recent debates, optionally restricted to one house
  pub async fn recent_debates(
    &self,
    house: Option<House>,
    take: u32,
  ) -> Result<Vec<SearchResultRecord>, UpstreamError> {
    let mut params = vec![("queryParameters.take".to_string(), take.to_string())];
    if let Some(house) = house {
      params.push(("queryParameters.house".to_string(), house.to_string()));
    }

    let response = self.client.get("search/debates.json", &params).await?;
    decode_list(response, "Results")
  }

  /// Full transcript of one debate section
  pub async fn debate(&self, id: &str) -> Result<Debate, UpstreamError> {
    let response = self.client.get(&format!("debates/debate/{id}.json"), &[]).await?;
    decode(response)
  }

  /// Spoken contributions by one member
  pub async fn member_contributions(
    &self,
    member_id: u32,
    take: u32,
  ) -> Result<Vec<ContributionResult>, UpstreamError> {
    let params = vec![
      ("queryParameters.memberId".to_string(), member_id.to_string()),
      ("queryParameters.take".to_string(), take.to_string()),
    ];

    let response = self.client.get("search/contributions/Spoken.json", &params).await?;
    decode_list(response, "Results")
  }
}
