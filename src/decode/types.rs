//! Decoder types
//!
//! Defines the response formats the web services expose.

use serde::{Deserialize, Serialize};

/// Format a resource is requested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `index.json`
    #[default]
    Json,
    /// `index.txt`
    Text,
}

impl ResponseFormat {
    /// Index document name for this format
    pub fn index(self) -> &'static str {
        match self {
            Self::Json => "index.json",
            Self::Text => "index.txt",
        }
    }

    /// Join the index document onto a resource directory
    ///
    /// `resource("players/foo")` gives `players/foo/index.json`.
    pub fn resource(self, dir: &str) -> String {
        format!("{}/{}", dir.trim_end_matches('/'), self.index())
    }
}
