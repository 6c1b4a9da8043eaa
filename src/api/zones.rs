//! Zone resources
//!
//! Zones form a tree addressed either by numeric id or by pipe-separated
//! path (`World|Europe|France`).

use super::types::ZoneInfo;
use super::{get_json, get_scalar, require, require_id};
use crate::decode::ResponseFormat;
use crate::error::Result;
use crate::http::WsClient;
use crate::pagination::{PageEnumerator, PageQuery};
use crate::types::{SortField, SortOrder};
use futures::stream::BoxStream;
use std::sync::Arc;

/// Collection walked by [`Zones::all`]
const ZONES_INDEX: &str = "zones/all/index.json";

/// `zones/...`
#[derive(Debug, Clone, Copy)]
pub struct Zones<'a> {
    client: &'a WsClient,
}

impl<'a> Zones<'a> {
    pub(crate) fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    // ========================================================================
    // Single zone
    // ========================================================================

    /// Zone by numeric id
    pub async fn info_by_id(&self, id: u32) -> Result<ZoneInfo> {
        let id = require_id("id", id)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("zones/id/{id}"))).await
    }

    /// Zone by its `|`-separated path
    pub async fn info_by_path(&self, path: &str) -> Result<ZoneInfo> {
        let path = require("path", path)?;
        get_json(self.client, &ResponseFormat::Json.resource(&format!("zones/path/{path}"))).await
    }

    /// Numeric id of the zone at `path`
    pub async fn id_of(&self, path: &str) -> Result<u32> {
        let path = require("path", path)?;
        get_scalar(self.client, &ResponseFormat::Text.resource(&format!("zones/path/{path}/id"))).await
    }

    /// Number of players registered in a zone and its children
    pub async fn population_by_id(&self, id: u32) -> Result<u32> {
        let id = require_id("id", id)?;
        let dir = format!("zones/id/{id}/population");
        get_scalar(self.client, &ResponseFormat::Text.resource(&dir)).await
    }

    /// Number of players registered in the zone at `path` and its children
    pub async fn population_by_path(&self, path: &str) -> Result<u32> {
        let path = require("path", path)?;
        let dir = format!("zones/path/{path}/population");
        get_scalar(self.client, &ResponseFormat::Text.resource(&dir)).await
    }

    // ========================================================================
    // Single-page listings
    // ========================================================================

    /// One window of the flat zone list
    pub async fn list(
        &self,
        offset: u64,
        length: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<Vec<ZoneInfo>> {
        self.list_at(ZONES_INDEX.to_string(), offset, length, sort, order)
            .await
    }

    /// One window of the direct children of a zone
    pub async fn children_by_id(
        &self,
        id: u32,
        offset: u64,
        length: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<Vec<ZoneInfo>> {
        let id = require_id("id", id)?;
        let resource = ResponseFormat::Json.resource(&format!("zones/id/{id}/children"));
        self.list_at(resource, offset, length, sort, order).await
    }

    /// One window of the direct children of a zone
    pub async fn children_by_path(
        &self,
        path: &str,
        offset: u64,
        length: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<Vec<ZoneInfo>> {
        let path = require("path", path)?;
        let resource = ResponseFormat::Json.resource(&format!("zones/path/{path}/children"));
        self.list_at(resource, offset, length, sort, order).await
    }

    async fn list_at(
        &self,
        resource: String,
        offset: u64,
        length: u32,
        sort: SortField,
        order: SortOrder,
    ) -> Result<Vec<ZoneInfo>> {
        if length == 0 {
            return Ok(Vec::new());
        }

        let resource = format!(
            "{resource}?offset={offset}&length={length}&sort={}&order={}",
            sort.as_query(),
            order.as_query()
        );
        get_json(self.client, &resource).await
    }

    // ========================================================================
    // Full listing
    // ========================================================================

    /// Every zone, fetched `step_size` at a time
    ///
    /// The walk stops quietly after a short page or once `max_retries`
    /// failed fetches have been retried. Items within a page come out in
    /// reverse; see [`PageEnumerator`].
    pub fn all(
        &self,
        step_size: u32,
        max_retries: u32,
        sort: SortField,
        order: SortOrder,
    ) -> BoxStream<'static, ZoneInfo> {
        self.enumerator(step_size, max_retries, sort, order)
            .into_stream()
    }

    /// [`Zones::all`] with the client's configured paging
    pub fn all_with_defaults(&self, sort: SortField, order: SortOrder) -> BoxStream<'static, ZoneInfo> {
        let paging = self.client.config().paging;
        self.all(paging.step_size, paging.max_retries, sort, order)
    }

    /// Pull form of [`Zones::all`], exposing why the walk ended
    pub fn enumerator(
        &self,
        step_size: u32,
        max_retries: u32,
        sort: SortField,
        order: SortOrder,
    ) -> PageEnumerator<ZoneInfo> {
        let query = PageQuery::new(ZONES_INDEX)
            .param("sort", sort.as_query())
            .param("order", order.as_query());

        PageEnumerator::new(
            Arc::new(self.client.clone()),
            query,
            step_size,
            max_retries,
        )
    }
}
