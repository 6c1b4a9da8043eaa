//! Pagination types and traits
//!
//! Defines the fetch contract the enumerator consumes and the small value
//! types it tracks.

use async_trait::async_trait;
use url::form_urlencoded;

/// Result of fetching one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Raw response body
    Success(String),
    /// The page could not be fetched, for any reason
    Unavailable,
}

impl FetchOutcome {
    /// Take the body, if any
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success(body) => Some(body),
            Self::Unavailable => None,
        }
    }
}

impl From<Option<String>> for FetchOutcome {
    fn from(body: Option<String>) -> Self {
        body.map_or(Self::Unavailable, Self::Success)
    }
}

/// Source of raw page bodies
///
/// Implementations must not retry on their own; the enumerator owns the
/// retry budget.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the resource addressed by a path plus query string
    async fn fetch(&self, resource: &str) -> FetchOutcome;
}

/// One `(offset, length)` slice of a remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Index of the first record
    pub offset: u64,
    /// Number of records requested
    pub length: u32,
}

impl PageWindow {
    /// Create a window
    pub fn new(offset: u64, length: u32) -> Self {
        Self { offset, length }
    }

    /// The window that follows this one
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            offset: self.offset + u64::from(self.length),
            length: self.length,
        }
    }
}

/// A listing endpoint plus its fixed filter/sort parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    path: String,
    params: Vec<(String, String)>,
}

impl PageQuery {
    /// Create a query for a collection path such as `zones/all/index.json`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Add a fixed parameter sent with every page
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Collection path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Render the resource string for a window
    ///
    /// Produces `<path>?length=<L>[&<params>]&offset=<O>`.
    pub fn render(&self, window: PageWindow) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("length", &window.length.to_string());
        for (key, value) in &self.params {
            query.append_pair(key, value);
        }
        query.append_pair("offset", &window.offset.to_string());

        let separator = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{separator}{}", self.path, query.finish())
    }
}

/// Tracks failed fetches against a fixed allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    /// Failures tolerated before giving up
    pub max_retries: u32,
    /// Failures already spent
    pub retries_used: u32,
}

impl RetryBudget {
    /// Create an unused budget
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retries_used: 0,
        }
    }

    /// Spend one retry, returning false once the budget is gone
    pub fn try_consume(&mut self) -> bool {
        if self.retries_used < self.max_retries {
            self.retries_used += 1;
            true
        } else {
            false
        }
    }

    /// Retries left
    pub fn remaining(&self) -> u32 {
        self.max_retries - self.retries_used
    }
}

/// Why an enumeration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A short page signalled the end of the collection, or the step size was zero
    Exhausted,
    /// A fetch failed after the retry budget was spent
    RetriesExhausted,
}
