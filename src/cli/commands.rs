//! CLI commands and argument parsing

use crate::types::{SortField, SortOrder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ManiaPlanet web services CLI
#[derive(Parser, Debug)]
#[command(name = "maniaplanet-ws")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API username, overrides config and environment
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// API password, overrides config and environment
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Web services base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a player's public profile
    Player {
        login: String,
    },

    /// Show the planets balance of the authenticated player
    Maniastars {
        login: String,
    },

    /// Show a server
    Server {
        login: String,
    },

    /// List players connected to a server
    ServerPlayers {
        login: String,
    },

    /// Walk every server, one record per line
    Servers {
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Show a zone by numeric id or pipe-separated path
    Zone {
        zone: String,
    },

    /// Walk every zone, one record per line
    Zones {
        /// Sort field (id, path)
        #[arg(long, default_value = "id")]
        sort: SortField,

        /// Sort order (asc, desc, 1, -1)
        #[arg(long, default_value = "asc", allow_negative_numbers = true)]
        order: SortOrder,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Show a title pack
    Title {
        id: String,
    },

    /// Show a team
    Team {
        id: u32,
    },

    /// Show a player's multiplayer ladder standing in a title
    Ranking {
        login: String,
        title: String,
    },

    /// Resolve the nation of a zone path
    Nation {
        zone_path: String,

        /// Nation list (JSON) to look the nation up in
        #[arg(long)]
        nations: Option<PathBuf>,
    },
}

/// Paging options shared by the full listings
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct PagingArgs {
    /// Items per page (config default when omitted)
    #[arg(long)]
    pub step_size: Option<u32>,

    /// Failed fetches to retry before giving up (config default when omitted)
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Stop after this many items
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
