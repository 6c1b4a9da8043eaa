//! Title pack resources

use super::types::TitleInfo;
use super::{get_json, require};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;

/// `titles/...`
#[derive(Debug, Clone, Copy)]
pub struct Titles<'a> {
    client: &'a WsClient,
}

impl<'a> Titles<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Title pack by its string id, e.g. `TMCanyon@nadeo`
    pub async fn info(&self, id: &str) -> Result<TitleInfo> {
        let id = require("id", id)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("titles/{id}"))).await
    }
}
