//! Team resources

use super::types::{ContractInfo, TeamInfo, TeamRanking};
use super::{get_json, require_id};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;

/// `teams/{id}/...`
#[derive(Debug, Clone, Copy)]
pub struct Teams<'a> {
    client: &'a WsClient,
}

impl<'a> Teams<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Team profile by numeric id
    pub async fn info(&self, id: u32) -> Result<TeamInfo> {
        let dir = team_dir(id, "")?;
        get_json(self.client, &ResponseFormat::Json.resource(&dir)).await
    }

    /// Administrators, as team records
    pub async fn admins(&self, id: u32) -> Result<Vec<TeamInfo>> {
        let dir = team_dir(id, "admins")?;
        get_json(self.client, &ResponseFormat::Json.resource(&dir)).await
    }

    /// Membership contracts of the team
    pub async fn contracts(&self, id: u32) -> Result<Vec<ContractInfo>> {
        let dir = team_dir(id, "contracts")?;
        get_json(self.client, &ResponseFormat::Json.resource(&dir)).await
    }

    /// Rank of the team in each zone it is ranked in
    pub async fn rankings(&self, id: u32) -> Result<Vec<TeamRanking>> {
        let dir = team_dir(id, "rank")?;
        get_json(self.client, &ResponseFormat::Json.resource(&dir)).await
    }
}

fn team_dir(id: u32, sub: &str) -> Result<String> {
    let id = require_id("id", id)?;
    Ok(if sub.is_empty() {
        format!("teams/{id}")
    } else {
        format!("teams/{id}/{sub}")
    })
}
