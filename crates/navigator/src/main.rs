use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use navigator::cli::commands;
use navigator::config::UpstreamConfig;
use navigator::models::topic::parse_keywords;
use navigator::models::House;
use navigator::upstream::hansard::{DEFAULT_CONTRIBUTIONS_TAKE, DEFAULT_RECENT_TAKE, DEFAULT_SEARCH_TAKE};
use navigator::validation::validate_house;

#[derive(Parser)]
#[command(name = "navigator")]
#[command(about = "Parliament Navigator - search Hansard debates, track members and analyse topics")]
#[command(version)]
struct Cli {
  #[command(flatten)]
  upstream: UpstreamConfig,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

fn parse_house(value: &str) -> Result<House, String> {
  validate_house(Some(value), House::Commons).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum Command {
  /// Search debate transcripts
  Search {
    /// Search term
    term: String,
    /// Restrict to one house (Commons or Lords)
    #[arg(long, value_parser = parse_house)]
    house: Option<House>,
    /// Number of results
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_TAKE)]
    take: u32,
    /// Only contributions by this member id
    #[arg(short, long)]
    member: Option<u32>,
  },
  /// List recent debates
  Debates {
    #[arg(long, value_parser = parse_house)]
    house: Option<House>,
    #[arg(short, long, default_value_t = DEFAULT_RECENT_TAKE)]
    take: u32,
  },
  /// Show one debate transcript with its speakers
  Debate {
    /// Debate section id
    id: String,
    /// Only contributions mentioning this text
    #[arg(short, long)]
    filter: Option<String>,
    /// Only contributions by this member id
    #[arg(short, long)]
    speaker: Option<u32>,
  },
  /// Find current members by name
  Members {
    name: String,
  },
  /// Show one member's details
  Member {
    id: u32,
  },
  /// Recent spoken contributions by a member
  Contributions {
    member_id: u32,
    #[arg(short, long, default_value_t = DEFAULT_CONTRIBUTIONS_TAKE)]
    take: u32,
  },
  /// Manage the member watchlist
  Watchlist {
    #[command(subcommand)]
    action: WatchlistAction,
  },
  /// Manage and analyse topic groups
  Topics {
    #[command(subcommand)]
    action: TopicsAction,
  },
}

#[derive(Subcommand)]
enum WatchlistAction {
  /// Show tracked members
  List,
  /// Start tracking a member
  Add { member_id: u32 },
  /// Stop tracking a member
  Remove { member_id: u32 },
}

#[derive(Subcommand)]
enum TopicsAction {
  /// Show all topic groups
  List,
  /// Create a topic group
  Add {
    name: String,
    /// Comma-separated keywords
    keywords: String,
  },
  /// Rename a topic or replace its keywords
  Edit {
    id: String,
    #[arg(short, long)]
    name: Option<String>,
    /// Comma-separated keywords
    #[arg(short, long)]
    keywords: Option<String>,
  },
  /// Delete a topic group
  Remove { id: String },
  /// Rank the members who speak most about a topic
  Analyze { id: String },
}

async fn handle(config: &UpstreamConfig, command: Command) -> Result<()> {
  match command {
    Command::Search { term, house, take, member } => commands::search(config, &term, house, take, member).await,
    Command::Debates { house, take } => commands::debates(config, house, take).await,
    Command::Debate { id, filter, speaker } => commands::debate(config, &id, filter.as_deref(), speaker).await,
    Command::Members { name } => commands::members(config, &name).await,
    Command::Member { id } => commands::member(config, id).await,
    Command::Contributions { member_id, take } => commands::contributions(config, member_id, take).await,
    Command::Watchlist { action } => match action {
      WatchlistAction::List => commands::watchlist_list(),
      WatchlistAction::Add { member_id } => commands::watchlist_add(config, member_id).await,
      WatchlistAction::Remove { member_id } => commands::watchlist_remove(member_id),
    },
    Command::Topics { action } => match action {
      TopicsAction::List => commands::topics_list(),
      TopicsAction::Add { name, keywords } => commands::topics_add(&name, &parse_keywords(&keywords)),
      TopicsAction::Edit { id, name, keywords } => {
        commands::topics_edit(&id, name.as_deref(), keywords.as_deref().map(parse_keywords))
      }
      TopicsAction::Remove { id } => commands::topics_remove(&id),
      TopicsAction::Analyze { id } => commands::topics_analyze(config, &id).await,
    },
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "navigator=debug,info" } else { "navigator=warn,error" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

  handle(&cli.upstream, cli.command).await?;
  Ok(())
}
