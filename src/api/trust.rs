//! Trust circle resources
//!
//! Circles are shared black and white lists. The authenticated account can
//! list or unlist players in its own lists and read the aggregated lists of
//! any circle.

use super::types::{Karma, ListEntry};
use super::{get_json, require};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;
use tracing::debug;

/// `trust/...`
#[derive(Debug, Clone, Copy)]
pub struct TrustCircles<'a> {
    client: &'a WsClient,
}

impl<'a> TrustCircles<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    // ========================================================================
    // Own lists
    // ========================================================================

    /// Add a player to the account's own blacklist
    pub async fn blacklist_player(&self, login: &str) -> Result<()> {
        self.post_login("black", login).await
    }

    /// Remove a player from the account's own blacklist
    pub async fn unblacklist_player(&self, login: &str) -> Result<()> {
        self.post_login("unblack", login).await
    }

    /// Add a player to the account's own whitelist
    pub async fn whitelist_player(&self, login: &str) -> Result<()> {
        self.post_login("white", login).await
    }

    /// Remove a player from the account's own whitelist
    pub async fn unwhitelist_player(&self, login: &str) -> Result<()> {
        self.post_login("unwhite", login).await
    }

    /// Logins on the account's own blacklist
    pub async fn own_blacklist(&self) -> Result<Vec<String>> {
        get_json(self.client, &ResponseFormat::Json.resource("trust/black")).await
    }

    /// Logins on the account's own whitelist
    pub async fn own_whitelist(&self) -> Result<Vec<String>> {
        get_json(self.client, &ResponseFormat::Json.resource("trust/white")).await
    }

    // ========================================================================
    // Circles
    // ========================================================================

    /// Players on a circle's blacklist, with how many members listed them
    pub async fn blacklist(&self, circle: &str) -> Result<Vec<ListEntry>> {
        let circle = require("circle", circle)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("trust/{circle}/black"))).await
    }

    /// Players on a circle's whitelist, with how many members listed them
    pub async fn whitelist(&self, circle: &str) -> Result<Vec<ListEntry>> {
        let circle = require("circle", circle)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("trust/{circle}/white"))).await
    }

    /// How often a player was listed in a circle
    pub async fn karma(&self, circle: &str, login: &str) -> Result<Karma> {
        let circle = require("circle", circle)?;
        let login = require("login", login)?;
        let dir = format!("trust/{circle}/karma/{login}");
        get_json(self.client, &ResponseFormat::Json.resource(&dir)).await
    }

    async fn post_login(&self, list: &str, login: &str) -> Result<()> {
        let login = require("login", login)?;
        let resource = ResponseFormat::Text.resource(&format!("trust/{list}"));
        self.client.post(&resource, login).await?;
        debug!(list, login, "Trust list updated");
        Ok(())
    }
}
