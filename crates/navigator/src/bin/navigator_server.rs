//! Parliament Navigator proxy server
//!
//! Validating, CORS-enabled HTTP proxy in front of the Hansard, Members and
//! Bills APIs for browser clients.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use navigator::config::UpstreamConfig;
use navigator::server::{start_server, AppState};

#[derive(Parser)]
#[command(name = "navigator_server")]
#[command(about = "Parliament Navigator API proxy")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, env = "NAVIGATOR_BIND", default_value = "127.0.0.1:8788")]
  bind: SocketAddr,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,

  #[command(flatten)]
  upstream: UpstreamConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let default_filter = if args.verbose {
    "navigator=debug,tower_http=debug,info"
  } else {
    "navigator=info,tower_http=info,warn"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  info!(version = env!("CARGO_PKG_VERSION"), "starting parliament navigator proxy");
  info!(hansard = %args.upstream.hansard_url, members = %args.upstream.members_url, bills = %args.upstream.bills_url, "upstream APIs");

  let state = AppState::from_config(&args.upstream)?;
  start_server(args.bind, state).await?;

  Ok(())
}
