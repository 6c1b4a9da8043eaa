//! Resource records
//!
//! Every field is optional: the services omit keys freely and callers are
//! expected to cope with partial records. Numeric flags go through
//! [`crate::decode::flag`].

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Shared
// ============================================================================

/// Date as the services send it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInfo {
    /// Wall-clock time, e.g. `2013-01-22 13:39:23.000000`
    #[serde(default)]
    pub date: Option<String>,
    /// PHP timezone kind
    #[serde(default, rename = "timezone_type")]
    pub timezone_type: Option<u32>,
    /// Timezone name, e.g. `Europe/Paris`
    #[serde(default)]
    pub timezone: Option<String>,
}

impl DateInfo {
    /// Parse the raw date, ignoring the timezone
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        let raw = self
            .date
            .as_deref()
            .ok_or_else(|| Error::decode("Date is missing"))?;

        NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S%.f")
            .map_err(|e| Error::decode(format!("Invalid date '{raw}': {e}")))
    }
}

/// A zone, i.e. a node of the `World|Continent|Country|...` tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Full pipe-separated path
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, rename = "iconURL")]
    pub icon_url: Option<String>,
    #[serde(default, rename = "iconJPGURL")]
    pub icon_jpg_url: Option<String>,
    #[serde(default, rename = "iconDDSURL")]
    pub icon_dds_url: Option<String>,
}

/// A title pack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub id_string: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Price in planets
    #[serde(default)]
    pub cost: Option<u32>,
    #[serde(default, with = "crate::decode::flag")]
    pub is_custom: Option<bool>,
    #[serde(default, deserialize_with = "crate::decode::list::deserialize")]
    pub dependencies: Vec<String>,
    #[serde(default, rename = "web")]
    pub website: Option<String>,
}

// ============================================================================
// Players
// ============================================================================

/// Public player profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub login: Option<String>,
    /// Nickname with formatting codes
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default, rename = "idZone")]
    pub zone_id: Option<u32>,
    #[serde(default, rename = "path")]
    pub zone_path: Option<String>,
}

// ============================================================================
// Servers
// ============================================================================

/// Dedicated or player-hosted server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default, rename = "serverName")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "owner")]
    pub owner_login: Option<String>,
    #[serde(default)]
    pub player_count: Option<u32>,
    #[serde(default)]
    pub max_player_count: Option<u32>,
    #[serde(
        default,
        rename = "mapsList",
        deserialize_with = "crate::decode::list::deserialize"
    )]
    pub maps: Vec<String>,
    #[serde(default)]
    pub script_name: Option<String>,
    #[serde(default)]
    pub script_version: Option<String>,
    #[serde(default, rename = "scriptTeam", with = "crate::decode::flag")]
    pub script_uses_team_mode: Option<bool>,
    #[serde(default, rename = "buildVersion")]
    pub version: Option<String>,
    #[serde(default, with = "crate::decode::flag")]
    pub is_dedicated: Option<bool>,
    #[serde(default, with = "crate::decode::flag")]
    pub is_ladder: Option<bool>,
    #[serde(default, with = "crate::decode::flag")]
    pub is_lobby: Option<bool>,
    #[serde(default, with = "crate::decode::flag")]
    pub is_online: Option<bool>,
    #[serde(default, with = "crate::decode::flag")]
    pub is_private: Option<bool>,
    #[serde(default, rename = "ladderPointsAvg")]
    pub ladder_points_average: Option<f32>,
    #[serde(default)]
    pub ladder_points_min: Option<f32>,
    #[serde(default)]
    pub ladder_points_max: Option<f32>,
    #[serde(default, rename = "ladderLimitMin")]
    pub ladder_points_limit_min: Option<f32>,
    #[serde(default, rename = "ladderLimitMax")]
    pub ladder_points_limit_max: Option<f32>,
    #[serde(default)]
    pub title: Option<TitleInfo>,
    #[serde(default)]
    pub zone: Option<ZoneInfo>,
}

// ============================================================================
// Teams
// ============================================================================

/// Team profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, rename = "creatorLogin")]
    pub creator: Option<String>,
    #[serde(default)]
    pub creation_date: Option<DateInfo>,
    #[serde(default, rename = "deleted", with = "crate::decode::flag")]
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub emblem: Option<String>,
    #[serde(default)]
    pub emblem_web: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub secondary_color: Option<String>,
    #[serde(default)]
    pub ladder_points: Option<u32>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default, rename = "teamSize")]
    pub size: Option<u32>,
    #[serde(default, rename = "minTeamSize")]
    pub min_size: Option<u32>,
    #[serde(default, rename = "maxTeamSize")]
    pub max_size: Option<u32>,
    #[serde(default)]
    pub title: Option<TitleInfo>,
    #[serde(default)]
    pub zone: Option<ZoneInfo>,
}

/// Membership contract between a player and a team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractInfo {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub state: Option<i32>,
    #[serde(default)]
    pub date: Option<DateInfo>,
    #[serde(default)]
    pub player: Option<PlayerInfo>,
    #[serde(default)]
    pub team: Option<TeamInfo>,
}

/// Team position in one zone's ladder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRanking {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub ladder_points: Option<u32>,
    #[serde(default)]
    pub title_id: Option<u32>,
    #[serde(default)]
    pub zone_id: Option<u32>,
    #[serde(default, rename = "path")]
    pub zone_path: Option<String>,
}

// ============================================================================
// Rankings
// ============================================================================

/// Multiplayer ladder standing of a player in a title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    #[serde(default)]
    pub points: Option<f32>,
    /// Environment or title the points belong to
    #[serde(default, rename = "environment")]
    pub title: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    /// One entry per enclosing zone
    #[serde(default, rename = "ranks", deserialize_with = "crate::decode::list::deserialize")]
    pub rankings: Vec<Ranking>,
}

/// Rank within one zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, rename = "idZone")]
    pub zone_id: Option<u32>,
    #[serde(default, rename = "path")]
    pub zone_path: Option<String>,
}

// ============================================================================
// Trust circles
// ============================================================================

/// Black/white counts for a player in a circle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Karma {
    #[serde(default)]
    pub blacks: Option<u32>,
    #[serde(default)]
    pub whites: Option<u32>,
}

/// Entry of a circle's black or white list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    #[serde(default)]
    pub login: Option<String>,
    /// How many members listed the player
    #[serde(default)]
    pub count: Option<u32>,
}

// ============================================================================
// Manialinks
// ============================================================================

/// Registered manialink short code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManialinkInfo {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "login")]
    pub owner_login: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub planet_cost: Option<u32>,
}
