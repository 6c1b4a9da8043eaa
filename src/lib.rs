// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ManiaPlanet Web Services Client
//!
//! An async client for the ManiaPlanet web services: authenticated lookups
//! of players, servers, teams, titles, trust circles and zones, plus lazy
//! paginated walks over the full server and zone listings.
//!
//! ## Features
//!
//! - **Typed Resources**: One view per resource group, records with optional fields
//! - **Paginated Listings**: Offset-windowed walks with prefetch and a retry budget
//! - **Basic Auth**: Credentials on every request
//! - **Rate Limiting**: Optional client-side token bucket
//! - **Nations**: Zone path to nation resolution
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use maniaplanet_ws::{ClientConfig, Result, SortField, SortOrder, WsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::new("api_user", "api_password").with_env_overrides();
//!     let client = WsClient::new(config)?;
//!
//!     // Single lookup
//!     let player = client.players().info("some_login").await?;
//!     println!("{:?}", player.nickname);
//!
//!     // Full listing, 50 zones per request, up to 3 retries
//!     let mut zones = client.zones().all(50, 3, SortField::Id, SortOrder::Ascending);
//!     while let Some(zone) = zones.next().await {
//!         println!("{:?}", zone.path);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    api (WsApi, resource views)               │
//! │  players  servers  teams  titles  rankings  trust  zones     │
//! └───────────────┬───────────────────────────────┬──────────────┘
//!                 │ lookups                       │ listings
//!                 │                     ┌─────────┴──────────┐
//!                 │                     │ pagination          │
//!                 │                     │ PageEnumerator<T>   │
//!                 │                     └─────────┬──────────┘
//!                 │                               │ PageFetcher
//! ┌───────────────┴───────────────────────────────┴──────────────┐
//! │              http (WsClient: auth, rate limit)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document record fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Basic-auth credentials
pub mod auth;

/// Client configuration
pub mod config;

/// HTTP request executor with rate limiting
pub mod http;

/// Response decoders (JSON records, JSON pages, text scalars)
pub mod decode;

/// Paginated, retrying enumeration
pub mod pagination;

/// Typed resource groups
pub mod api;

/// Zone path to nation resolution
pub mod nations;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::WsApi;
pub use auth::Credentials;
pub use config::{ClientConfig, PagingConfig};
pub use http::{RateLimiterConfig, WsClient};
pub use nations::{nation_path, Nation, NationIndex};
pub use pagination::{EndReason, PageEnumerator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
