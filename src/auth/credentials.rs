//! Web services credentials
//!
//! A username/password pair issued for the web services API.

use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Basic-auth credentials for the web services
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// API username
    pub username: String,
    /// API password
    pub password: String,
}

impl Credentials {
    /// Create credentials from a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reject credentials with a blank username
    ///
    /// An empty password is allowed; the service decides whether it is valid.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::auth("username must not be blank"));
        }
        if self.username.contains(':') {
            return Err(Error::auth("username must not contain ':'"));
        }
        Ok(())
    }

    /// Apply the credentials to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.basic_auth(&self.username, Some(&self.password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
