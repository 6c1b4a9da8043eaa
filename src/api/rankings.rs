//! Ladder ranking resources

use super::types::PlayerRanking;
use super::{get_json, require};
use crate::error::Result;
use crate::http::WsClient;
use url::form_urlencoded;

/// `titles/rankings/...`
#[derive(Debug, Clone, Copy)]
pub struct Rankings<'a> {
    client: &'a WsClient,
}

impl<'a> Rankings<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Multiplayer ladder standing of a player in one title
    ///
    /// Both the login and the title are required.
    pub async fn multiplayer_player(&self, login: &str, title: &str) -> Result<PlayerRanking> {
        let login = require("login", login)?;
        let title = require("title", title)?;

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("title", title)
            .finish();
        let resource = format!("titles/rankings/multiplayer/player/{login}/index.json?{query}");

        get_json(self.client, &resource).await
    }
}
