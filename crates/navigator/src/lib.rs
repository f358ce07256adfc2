//! Parliament Navigator - Hansard debates and Parliament members, searchable
//!
//! Searches UK parliamentary debate transcripts and member records through the
//! public Hansard, Members and Bills APIs, tracks a watchlist of members and
//! ranks who speaks most about user-defined topics. Ships a command line front
//! end and a small validating proxy service for browser clients.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod server;
pub mod store;
pub mod upstream;
pub mod validation;
