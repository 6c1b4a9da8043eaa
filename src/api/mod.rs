//! Resource API module
//!
//! Typed calls for each web services resource group.
//!
//! # Overview
//!
//! Every group is a cheap borrowed view over a [`WsClient`]:
//!
//! ```no_run
//! # async fn run() -> maniaplanet_ws::Result<()> {
//! use maniaplanet_ws::WsClient;
//!
//! let client = WsClient::with_credentials("login", "password")?;
//! let player = client.players().info("some_login").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Identifiers are checked before any request is made: blank strings and
//! zero ids fail with `Error::InvalidArgument`. Listings of length zero
//! return an empty list without touching the network. The two full
//! listings, [`Servers::all`] and [`Zones::all`], walk the collection page
//! by page through [`crate::pagination::PageEnumerator`].

mod manialinks;
mod players;
mod rankings;
mod servers;
mod teams;
mod titles;
mod trust;
mod types;
mod zones;

pub use manialinks::Manialinks;
pub use players::Players;
pub use rankings::Rankings;
pub use servers::Servers;
pub use teams::Teams;
pub use titles::Titles;
pub use trust::TrustCircles;
pub use types::{
    ContractInfo, DateInfo, Karma, ListEntry, ManialinkInfo, PlayerInfo, PlayerRanking, Ranking,
    ServerInfo, TeamInfo, TeamRanking, TitleInfo, ZoneInfo,
};
pub use zones::Zones;

use crate::config::ClientConfig;
use crate::decode::{decode_record, decode_scalar};
use crate::error::{Error, Result};
use crate::http::WsClient;
use serde::de::DeserializeOwned;
use std::str::FromStr;


// ============================================================================
// Facade
// ============================================================================

/// All resource groups behind one owned client
#[derive(Debug, Clone)]
pub struct WsApi {
    client: WsClient,
}

impl WsApi {
    /// Build the client and wrap it
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(WsClient::new(config)?))
    }

    /// Wrap an existing client
    pub fn from_client(client: WsClient) -> Self {
        Self { client }
    }

    /// The underlying client
    pub fn client(&self) -> &WsClient {
        &self.client
    }

    pub fn manialinks(&self) -> Manialinks<'_> {
        self.client.manialinks()
    }

    pub fn players(&self) -> Players<'_> {
        self.client.players()
    }

    pub fn rankings(&self) -> Rankings<'_> {
        self.client.rankings()
    }

    pub fn servers(&self) -> Servers<'_> {
        self.client.servers()
    }

    pub fn teams(&self) -> Teams<'_> {
        self.client.teams()
    }

    pub fn titles(&self) -> Titles<'_> {
        self.client.titles()
    }

    pub fn trust(&self) -> TrustCircles<'_> {
        self.client.trust()
    }

    pub fn zones(&self) -> Zones<'_> {
        self.client.zones()
    }
}

impl WsClient {
    /// Manialink short codes
    pub fn manialinks(&self) -> Manialinks<'_> {
        Manialinks::new(self)
    }

    /// Player profiles and planets
    pub fn players(&self) -> Players<'_> {
        Players::new(self)
    }

    /// Multiplayer ladders
    pub fn rankings(&self) -> Rankings<'_> {
        Rankings::new(self)
    }

    /// Server details and the full server listing
    pub fn servers(&self) -> Servers<'_> {
        Servers::new(self)
    }

    /// Teams, their admins, contracts and ranks
    pub fn teams(&self) -> Teams<'_> {
        Teams::new(self)
    }

    /// Title packs
    pub fn titles(&self) -> Titles<'_> {
        Titles::new(self)
    }

    /// Trust circles (black and white lists)
    pub fn trust(&self) -> TrustCircles<'_> {
        TrustCircles::new(self)
    }

    /// Zone tree lookups and the full zone listing
    pub fn zones(&self) -> Zones<'_> {
        Zones::new(self)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Reject a blank identifier, returning it trimmed
pub(crate) fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument(name, "must not be blank"));
    }
    Ok(trimmed)
}

/// Reject a zero id
pub(crate) fn require_id(name: &str, id: u32) -> Result<u32> {
    if id == 0 {
        return Err(Error::invalid_argument(name, "must be positive"));
    }
    Ok(id)
}

/// GET a JSON resource and decode it
pub(crate) async fn get_json<T: DeserializeOwned>(client: &WsClient, resource: &str) -> Result<T> {
    let body = client.get(resource).await?;
    decode_record(&body)
}

/// GET a plain-text resource and parse it
pub(crate) async fn get_scalar<T: FromStr>(client: &WsClient, resource: &str) -> Result<T> {
    let body = client.get(resource).await?;
    decode_scalar(&body)
}
