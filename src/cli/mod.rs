//! CLI module
//!
//! Command-line interface over the web services.
//!
//! # Commands
//!
//! - `player`, `maniastars` - Player lookups
//! - `server`, `server-players` - Server lookups
//! - `servers` - Walk the full server listing
//! - `zone`, `zones` - Zone lookup and the full zone listing
//! - `title`, `team`, `ranking` - Other single-resource lookups
//! - `nation` - Resolve a zone path to its nation (offline)

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PagingArgs};
pub use runner::Runner;
