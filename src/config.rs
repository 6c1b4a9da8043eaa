//! Client configuration
//!
//! `ClientConfig` carries everything `WsClient` needs: the service base URL,
//! credentials, transport settings and the defaults used by the paginated
//! listings. It can be built in code, loaded from YAML, and have its
//! credentials overridden from the environment.
//!
//! ```yaml
//! base_url: http://ws.maniaplanet.com/
//! credentials:
//!   username: my_api_user
//!   password: my_api_password
//! timeout_secs: 30
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! paging:
//!   step_size: 50
//!   max_retries: 3
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default web services host
pub const DEFAULT_BASE_URL: &str = "http://ws.maniaplanet.com/";

/// Environment variable overriding the username
pub const ENV_USERNAME: &str = "MANIAPLANET_WS_USERNAME";

/// Environment variable overriding the password
pub const ENV_PASSWORD: &str = "MANIAPLANET_WS_PASSWORD";

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "MANIAPLANET_WS_BASE_URL";

// ============================================================================
// Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every resource path is joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Basic-auth credentials
    #[serde(default = "default_credentials")]
    pub credentials: Credentials,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Defaults for paginated listings
    #[serde(default)]
    pub paging: PagingConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_credentials() -> Credentials {
    Credentials::new("", "")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("maniaplanet-ws/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            credentials: default_credentials(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            rate_limit: None,
            paging: PagingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the default host with the given credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            ..Default::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to load config '{}'", path.display()))
    }

    /// Apply overrides from the process environment
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(username) = lookup(ENV_USERNAME).none_if_empty() {
            self.credentials.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD).none_if_empty() {
            self.credentials.password = password;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            self.base_url = base_url;
        }
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.credentials.username.trim().is_empty() {
            return Err(Error::missing_field("credentials.username"));
        }
        self.credentials.validate()?;
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be positive",
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Paging Config
// ============================================================================

/// Defaults for the paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Records requested per page
    #[serde(default = "default_step_size")]
    pub step_size: u32,

    /// Failed fetches tolerated before a listing gives up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_step_size() -> u32 {
    50
}

fn default_max_retries() -> u32 {
    3
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            step_size: default_step_size(),
            max_retries: default_max_retries(),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Credentials::new(username, password);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set the paging defaults
    pub fn paging(mut self, step_size: u32, max_retries: u32) -> Self {
        self.config.paging = PagingConfig {
            step_size,
            max_retries,
        };
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
