//! Player resources

use super::types::PlayerInfo;
use super::{get_json, get_scalar, require};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;

/// `players/...`
#[derive(Debug, Clone, Copy)]
pub struct Players<'a> {
    client: &'a WsClient,
}

impl<'a> Players<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Public profile of a player
    pub async fn info(&self, login: &str) -> Result<PlayerInfo> {
        let login = require("login", login)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("players/{login}"))).await
    }

    /// Planets balance of a player
    ///
    /// Only readable for the authenticated account.
    pub async fn maniastars(&self, login: &str) -> Result<i64> {
        let login = require("login", login)?;
        get_scalar(self.client, &ResponseFormat::Text.resource(&format!("players/{login}"))).await
    }
}
