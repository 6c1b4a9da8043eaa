//! Nation lookup
//!
//! Zone paths look like `World|Europe|France|Paris`. The first three
//! segments name the nation a player belongs to; a [`NationIndex`] maps
//! that prefix to its display data.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name given to nations whose path is too short to carry one
pub const OTHER_NATION: &str = "Other";

/// Nation prefix of a zone path
///
/// Returns the first three `|`-separated segments, the whole input when it
/// has exactly three, or `""` when the second or third segment is missing.
pub fn nation_path(zone_path: &str) -> &str {
    let Some(first) = zone_path.find('|') else {
        return "";
    };
    if zone_path.len() == first + 1 {
        return "";
    }

    let Some(second) = find_from(zone_path, first + 1) else {
        return "";
    };
    if zone_path.len() == second + 1 {
        return "";
    }

    match find_from(zone_path, second + 1) {
        Some(third) => &zone_path[..third],
        None => zone_path,
    }
}

fn find_from(haystack: &str, start: usize) -> Option<usize> {
    haystack[start..].find('|').map(|i| start + i)
}

// ============================================================================
// Records
// ============================================================================

/// Avatar skin tied to a nation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub id: String,
    pub collection: String,
    pub author: String,
    pub name: String,
}

/// Display data for one nation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Nation {
    /// Nation path, `""` for the catch-all entry
    pub path: String,
    /// Third path segment, or [`OTHER_NATION`]
    pub name: String,
    pub hymn: String,
    pub avatar_name: String,
    pub skin: Skin,
}

impl Nation {
    /// Create a nation, deriving its name from the path
    pub fn new(
        path: impl Into<String>,
        hymn: impl Into<String>,
        avatar_name: impl Into<String>,
        skin: Skin,
    ) -> Self {
        let path = path.into();
        let name = path
            .split('|')
            .nth(2)
            .unwrap_or(OTHER_NATION)
            .to_string();

        Self {
            path,
            name,
            hymn: hymn.into(),
            avatar_name: avatar_name.into(),
            skin,
        }
    }
}

/// Wire form of a nation; the name is always derived
#[derive(Deserialize)]
struct NationEntry {
    path: String,
    hymn: String,
    avatar_name: String,
    skin: Skin,
}

impl From<NationEntry> for Nation {
    fn from(entry: NationEntry) -> Self {
        Nation::new(entry.path, entry.hymn, entry.avatar_name, entry.skin)
    }
}

// ============================================================================
// Index
// ============================================================================

/// Immutable nation table keyed by lowercased path
#[derive(Debug, Clone, Default)]
pub struct NationIndex {
    nations: HashMap<String, Nation>,
}

impl NationIndex {
    /// Build an index, rejecting two nations with the same path
    pub fn from_nations(nations: impl IntoIterator<Item = Nation>) -> Result<Self> {
        let mut map = HashMap::new();

        for nation in nations {
            let key = nation.path.to_lowercase();
            if map.contains_key(&key) {
                return Err(Error::nation_data(format!(
                    "Duplicate nation path '{}'",
                    nation.path
                )));
            }
            map.insert(key, nation);
        }

        debug!(count = map.len(), "Nation index built");
        Ok(Self { nations: map })
    }

    /// Build an index from a JSON array of nations
    ///
    /// Each entry needs `path`, `hymn`, `avatar_name` and a `skin` object
    /// with `id`, `collection`, `author` and `name`.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<NationEntry> = serde_json::from_str(json)
            .map_err(|e| Error::nation_data(format!("Invalid nation list: {e}")))?;
        Self::from_nations(entries.into_iter().map(Nation::from))
    }

    /// Load a JSON nation list from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read nation list {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Nation a zone belongs to
    ///
    /// Falls back to the catch-all entry (path `""`) when the zone's nation
    /// is unknown. `None` only if there is no catch-all either.
    pub fn get(&self, zone_path: &str) -> Option<&Nation> {
        let key = nation_path(zone_path).to_lowercase();
        self.nations.get(&key).or_else(|| self.nations.get(""))
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nation> {
        self.nations.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("World|Europe|France|Paris", "World|Europe|France" ; "deeper zone")]
    #[test_case("World|Europe|France", "World|Europe|France" ; "exactly three")]
    #[test_case("World|Europe", "" ; "two segments")]
    #[test_case("World", "" ; "single segment")]
    #[test_case("", "" ; "empty")]
    #[test_case("World|", "" ; "trailing first pipe")]
    #[test_case("World|Europe|", "" ; "trailing second pipe")]
    #[test_case("World|Europe|France|", "World|Europe|France" ; "trailing third pipe")]
    fn test_nation_path(input: &str, expected: &str) {
        assert_eq!(nation_path(input), expected);
    }

    fn skin() -> Skin {
        Skin {
            id: "1".to_string(),
            collection: "Canyon".to_string(),
            author: "Nadeo".to_string(),
            name: "Flag".to_string(),
        }
    }

    #[test_case("World|Europe|France", "France" ; "named")]
    #[test_case("World|Europe", OTHER_NATION ; "short path")]
    #[test_case("", OTHER_NATION ; "catch-all")]
    fn test_nation_name(path: &str, expected: &str) {
        assert_eq!(Nation::new(path, "", "", skin()).name, expected);
    }

    fn index() -> NationIndex {
        NationIndex::from_nations([
            Nation::new("", "anthem", "Other", skin()),
            Nation::new("World|Europe|France", "marseillaise", "France", skin()),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let index = index();
        let nation = index.get("world|EUROPE|france|Paris").unwrap();
        assert_eq!(nation.name, "France");
        assert_eq!(nation.hymn, "marseillaise");
    }

    #[test]
    fn test_get_falls_back_to_catch_all() {
        let index = index();
        assert_eq!(index.get("World|Asia|Japan").unwrap().name, OTHER_NATION);
        assert_eq!(index.get("World").unwrap().path, "");
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_get_without_catch_all() {
        let index =
            NationIndex::from_nations([Nation::new("World|Europe|France", "", "", skin())]).unwrap();
        assert!(index.get("World|Asia|Japan").is_none());
    }

    #[test]
    fn test_duplicate_paths_are_rejected() {
        let err = NationIndex::from_nations([
            Nation::new("World|Europe|France", "", "", skin()),
            Nation::new("WORLD|Europe|France", "", "", skin()),
        ])
        .unwrap_err();

        assert!(matches!(err, Error::NationData { .. }));
        assert!(err.to_string().contains("WORLD|Europe|France"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "path": "World|Europe|Germany",
                "hymn": "hymn.ogg",
                "avatar_name": "Germany",
                "skin": { "id": "9", "collection": "Storm", "author": "Nadeo", "name": "Flag" }
            }
        ]"#;

        let index = NationIndex::from_json(json).unwrap();
        let nation = index.get("World|Europe|Germany|Berlin").unwrap();
        assert_eq!(nation.name, "Germany");
        assert_eq!(nation.skin.collection, "Storm");
    }

    #[test]
    fn test_from_json_rejects_incomplete_entry() {
        let err = NationIndex::from_json(r#"[{ "path": "World" }]"#).unwrap_err();
        assert!(matches!(err, Error::NationData { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nations.json");
        std::fs::write(
            &file,
            r#"[{ "path": "", "hymn": "", "avatar_name": "", "skin": { "id": "", "collection": "", "author": "", "name": "" } }]"#,
        )
        .unwrap();

        let index = NationIndex::from_file(&file).unwrap();
        assert!(!index.is_empty());
        assert_eq!(index.iter().count(), 1);
    }
}
