use anyhow::{anyhow, Result};
use colored::*;

use crate::analysis::{analyze_topic_until, extract_speakers, filter_items, group_by_date, sorted_dates_descending};
use crate::cli::display::{
  display_contribution, display_date_header, display_debate_speakers, display_member, display_search_result,
  display_speaker_ranking, display_synopsis, display_topic, render_html, wrap_text,
};
use crate::config::{data_dir, UpstreamConfig};
use crate::models::{House, SearchResultRecord, TopicUpdate};
use crate::store::{FileStore, TopicGroups, Watchlist};
use crate::upstream::members::DEFAULT_MEMBER_SEARCH_TAKE;
use crate::upstream::{photo_url, SearchOptions};

fn open_store() -> FileStore {
  FileStore::new(data_dir())
}

fn print_grouped(records: &[SearchResultRecord], term: Option<&str>) {
  let groups = group_by_date(records);
  for date in sorted_dates_descending(&groups) {
    display_date_header(date);
    for record in &groups[date] {
      display_search_result(record, term);
    }
    println!();
  }
}

/// Search debate transcripts and print hits grouped by sitting day
pub async fn search(
  config: &UpstreamConfig,
  term: &str,
  house: Option<House>,
  take: u32,
  member: Option<u32>,
) -> Result<()> {
  let api = config.hansard_api()?;
  let options = SearchOptions { take: Some(take), member_id: member, house, ..SearchOptions::default() };
  let results = api.search(term, &options).await?;

  if results.is_empty() {
    println!("No results for {}", term.yellow());
    return Ok(());
  }

  println!("{} {} results for {}\n", "🔎".cyan(), results.len(), term.yellow().bold());
  print_grouped(&results, Some(term));
  Ok(())
}

pub async fn debates(config: &UpstreamConfig, house: Option<House>, take: u32) -> Result<()> {
  let api = config.hansard_api()?;
  let results = api.recent_debates(house, take).await?;

  if results.is_empty() {
    println!("No recent debates found.");
    return Ok(());
  }
  print_grouped(&results, None);
  Ok(())
}

/// Print one debate: speakers first, then the (optionally filtered) transcript
pub async fn debate(config: &UpstreamConfig, id: &str, filter: Option<&str>, speaker: Option<u32>) -> Result<()> {
  let api = config.hansard_api()?;
  let debate = api.debate(id).await?;
  let overview = &debate.overview;

  println!("{}", overview.title.blue().bold());
  let date = overview.date.as_deref().or(overview.sitting_date.as_deref()).unwrap_or_default();
  let location = overview.location.as_deref().unwrap_or_default();
  println!("{} {} {}\n", overview.house.to_string().dimmed(), date.dimmed(), location.dimmed());

  let speakers = extract_speakers(&debate.items);
  if !speakers.is_empty() {
    println!("{}", "Speakers".bold());
    display_debate_speakers(&speakers);
    println!();
  }

  let items = filter_items(&debate.items, filter, speaker);
  if items.is_empty() {
    println!("No contributions match.");
    return Ok(());
  }

  for item in items {
    if let Some(name) = &item.attributed_to {
      let time = item.timecode.as_deref().unwrap_or_default();
      println!("{} {}", name.cyan().bold(), time.dimmed());
    }
    if let Some(text) = &item.value {
      for line in wrap_text(&render_html(text, filter), 88) {
        println!("  {line}");
      }
    }
    println!();
  }
  Ok(())
}

pub async fn members(config: &UpstreamConfig, name: &str) -> Result<()> {
  let api = config.members_api()?;
  let members = api.search_members(name, DEFAULT_MEMBER_SEARCH_TAKE).await?;
  let watchlist = Watchlist::load(open_store());

  if members.is_empty() {
    println!("No current members match {}", name.yellow());
    return Ok(());
  }
  for member in &members {
    display_member(member, watchlist.contains(member.id));
  }
  Ok(())
}

pub async fn member(config: &UpstreamConfig, id: u32) -> Result<()> {
  let api = config.members_api()?;
  let detail = api.member_detail(id).await?;
  let watchlist = Watchlist::load(open_store());

  display_member(&detail.member, watchlist.contains(id));
  if let Some(title) = &detail.member.name_full_title {
    println!("         {}", title.dimmed());
  }
  println!("         {}", photo_url(id).dimmed());

  if let Some(synopsis) = &detail.synopsis {
    println!();
    display_synopsis(synopsis);
  }
  Ok(())
}

pub async fn contributions(config: &UpstreamConfig, member_id: u32, take: u32) -> Result<()> {
  let api = config.hansard_api()?;
  let contributions = api.member_contributions(member_id, take).await?;

  if contributions.is_empty() {
    println!("No spoken contributions found for member {member_id}");
    return Ok(());
  }
  for contribution in &contributions {
    display_contribution(contribution);
  }
  Ok(())
}

pub fn watchlist_list() -> Result<()> {
  let watchlist = Watchlist::load(open_store());
  if watchlist.members().is_empty() {
    println!("Your watchlist is empty.");
    return Ok(());
  }

  for member in watchlist.members() {
    let party = member.latest_party.as_ref().map(|p| p.name.as_str()).unwrap_or_default();
    let seat = member.latest_house_membership.as_ref().map(|m| m.summary()).unwrap_or_default();
    println!("{} {} {} {}", format!("{:>6}", member.id).dimmed(), member.name_display_as.bold(), party, seat.dimmed());
  }
  Ok(())
}

pub async fn watchlist_add(config: &UpstreamConfig, member_id: u32) -> Result<()> {
  let mut watchlist = Watchlist::load(open_store());
  if watchlist.contains(member_id) {
    println!("Member {} is already on your watchlist", member_id.to_string().yellow());
    return Ok(());
  }

  let member = config.members_api()?.member(member_id).await?;
  let name = member.name_display_as.clone();
  watchlist.add(member);
  println!("{} Watching {}", "✓".green(), name.bold());
  Ok(())
}

pub fn watchlist_remove(member_id: u32) -> Result<()> {
  let mut watchlist = Watchlist::load(open_store());
  if !watchlist.remove(member_id) {
    return Err(anyhow!("Member {member_id} is not on your watchlist"));
  }
  println!("{} Removed member {}", "✓".green(), member_id.to_string().yellow());
  Ok(())
}

pub fn topics_list() -> Result<()> {
  let topics = TopicGroups::load_or_seed(open_store());
  if topics.list().is_empty() {
    println!("No topics defined.");
    return Ok(());
  }
  for topic in topics.list() {
    display_topic(topic);
  }
  Ok(())
}

pub fn topics_add(name: &str, keywords: &[String]) -> Result<()> {
  let mut topics = TopicGroups::load_or_seed(open_store());
  let topic = topics.add(name, keywords)?;
  println!("{} Added topic {} {}", "✓".green(), topic.name.bold(), format!("({})", topic.id).dimmed());
  Ok(())
}

pub fn topics_edit(id: &str, name: Option<&str>, keywords: Option<Vec<String>>) -> Result<()> {
  if name.is_none() && keywords.is_none() {
    return Err(anyhow!("At least one of --name or --keywords must be specified"));
  }

  let mut topics = TopicGroups::load_or_seed(open_store());
  let changes = TopicUpdate { name: name.map(str::to_string), keywords };
  match topics.update(id, changes)? {
    Some(topic) => {
      println!("{} Updated topic {}", "✓".green(), topic.name.bold());
      Ok(())
    }
    None => Err(anyhow!("No topic with id {id}")),
  }
}

pub fn topics_remove(id: &str) -> Result<()> {
  let mut topics = TopicGroups::load_or_seed(open_store());
  if !topics.delete(id) {
    return Err(anyhow!("No topic with id {id}"));
  }
  println!("{} Removed topic {}", "✓".green(), id.yellow());
  Ok(())
}

/// Rank who speaks most about a stored topic. Ctrl-C abandons the searches.
pub async fn topics_analyze(config: &UpstreamConfig, id: &str) -> Result<()> {
  let topics = TopicGroups::load_or_seed(open_store());
  let topic = topics.get(id).ok_or_else(|| anyhow!("No topic with id {id}"))?;
  let api = config.hansard_api()?;

  println!("{} Analyzing {} ({})\n", "🔎".cyan(), topic.name.bold(), topic.keywords.join(", ").dimmed());

  let cancel = async {
    if tokio::signal::ctrl_c().await.is_err() {
      std::future::pending::<()>().await;
    }
  };
  let Some(speakers) = analyze_topic_until(&api, topic, cancel).await? else {
    println!("Analysis cancelled.");
    return Ok(());
  };

  if speakers.is_empty() {
    println!("Nobody has spoken about this topic recently.");
    return Ok(());
  }
  display_speaker_ranking(&speakers);
  Ok(())
}

