//! Server resources

use super::types::{PlayerInfo, ServerInfo};
use super::{get_json, get_scalar, require};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;
use crate::pagination::{PageEnumerator, PageQuery};
use futures::stream::BoxStream;
use std::sync::Arc;

/// Collection walked by [`Servers::all`]
const SERVERS_INDEX: &str = "servers/index.json";

/// `servers/...`
#[derive(Debug, Clone, Copy)]
pub struct Servers<'a> {
    client: &'a WsClient,
}

impl<'a> Servers<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Details of a dedicated server by login
    pub async fn info(&self, login: &str) -> Result<ServerInfo> {
        let login = require("login", login)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("servers/{login}"))).await
    }

    /// Players currently connected to a server
    pub async fn online_players(&self, login: &str) -> Result<Vec<PlayerInfo>> {
        let login = require("login", login)?;
        let dir = format!("servers/{login}/players");
        get_json(self.client, &ResponseFormat::Json.resource(&dir)).await
    }

    /// How many players bookmarked a server
    pub async fn favorited_count(&self, login: &str) -> Result<u32> {
        let login = require("login", login)?;
        let dir = format!("servers/{login}/favorited");
        get_scalar(self.client, &ResponseFormat::Text.resource(&dir)).await
    }

    /// Every server, fetched `step_size` at a time
    ///
    /// See [`PageEnumerator`] for ordering and failure behavior.
    pub fn all(&self, step_size: u32, max_retries: u32) -> BoxStream<'static, ServerInfo> {
        self.enumerator(step_size, max_retries).into_stream()
    }

    /// [`Servers::all`] with the client's configured paging
    pub fn all_with_defaults(&self) -> BoxStream<'static, ServerInfo> {
        let paging = self.client.config().paging;
        self.all(paging.step_size, paging.max_retries)
    }

    /// Pull form of [`Servers::all`], exposing why the walk ended
    pub fn enumerator(&self, step_size: u32, max_retries: u32) -> PageEnumerator<ServerInfo> {
        PageEnumerator::new(
            Arc::new(self.client.clone()),
            PageQuery::new(SERVERS_INDEX),
            step_size,
            max_retries,
        )
    }
}
