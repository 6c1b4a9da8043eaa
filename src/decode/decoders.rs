//! Decoder implementations

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::any::type_name;
use std::str::FromStr;

/// Longest body excerpt quoted in decode errors
const EXCERPT_LEN: usize = 64;

/// Decode a listing page, which must be a JSON array
pub fn decode_page<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    serde_json::from_str::<Vec<T>>(body).map_err(|e| {
        Error::decode(format!(
            "Expected a JSON array of {}: {e} (body: '{}')",
            short_type_name::<T>(),
            excerpt(body)
        ))
    })
}

/// Decode a single JSON record
pub fn decode_record<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str::<T>(body).map_err(|e| {
        Error::decode(format!(
            "Failed to parse {}: {e} (body: '{}')",
            short_type_name::<T>(),
            excerpt(body)
        ))
    })
}

/// Decode a plain-text scalar such as a count or id
///
/// Surrounding whitespace is ignored.
pub fn decode_scalar<T: FromStr>(body: &str) -> Result<T> {
    body.trim().parse::<T>().map_err(|_| {
        Error::decode(format!(
            "Expected {} but got '{}'",
            short_type_name::<T>(),
            excerpt(body.trim())
        ))
    })
}

fn short_type_name<T>() -> &'static str {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(EXCERPT_LEN) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
