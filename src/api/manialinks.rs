//! Manialink resources

use super::types::ManialinkInfo;
use super::{get_json, require};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;

/// `manialinks/...`
#[derive(Debug, Clone, Copy)]
pub struct Manialinks<'a> {
    client: &'a WsClient,
}

impl<'a> Manialinks<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Owner and target of a short code
    pub async fn info(&self, code: &str) -> Result<ManialinkInfo> {
        let code = require("code", code)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("manialinks/{code}"))).await
    }
}
