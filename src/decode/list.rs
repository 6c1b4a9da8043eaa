//! Serde helper for list fields the service sometimes sends as `null`
//!
//! Use with
//! `#[serde(default, deserialize_with = "crate::decode::list::deserialize")]`
//! on a `Vec<T>`. A missing field and an explicit `null` both become an
//! empty list.

use serde::{Deserialize, Deserializer};

/// Deserialize a list, mapping `null` to empty
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
