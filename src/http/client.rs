//! Web services request executor
//!
//! Sends one authenticated request per call and hands back the body text.
//! It never retries: the paginated listings own their retry budget, and the
//! single-resource lookups report errors to the caller.

use super::rate_limit::RateLimiter;
use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{FetchOutcome, PageFetcher};
use crate::types::Method;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Authenticated client for the web services
///
/// Cloning is cheap; clones share the connection pool and rate limiter.
#[derive(Clone)]
pub struct WsClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: Client,
    config: ClientConfig,
    credentials: Credentials,
    rate_limiter: Option<RateLimiter>,
}

impl WsClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);
        let credentials = config.credentials.clone();

        Ok(Self {
            inner: Arc::new(Inner {
                client,
                config,
                credentials,
                rate_limiter,
            }),
        })
    }

    /// Create a client for the default host
    pub fn with_credentials(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::new(ClientConfig::new(username, password))
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.inner.rate_limiter.is_some()
    }

    /// Execute a request against a resource path
    ///
    /// `resource` is relative to the base URL and may carry a query string.
    /// On a 2xx answer GET, POST and PUT return the body text and DELETE
    /// returns an empty string. `body` is sent as plain text.
    pub async fn execute(
        &self,
        method: Method,
        resource: &str,
        body: Option<String>,
    ) -> Result<String> {
        let url = self.build_url(resource);

        if let Some(limiter) = &self.inner.rate_limiter {
            if !limiter.try_acquire() {
                debug!(resource, "Rate limited, waiting for a permit");
                limiter.wait().await;
            }
        }

        let mut req = self
            .inner
            .client
            .request(method.into(), url.as_str());
        req = self.inner.credentials.apply(req);

        if let Some(body) = body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(body);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: self.inner.config.timeout().as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        debug!("Request succeeded: {:?} {}", method, url);

        if method == Method::DELETE {
            return Ok(String::new());
        }
        Ok(response.text().await?)
    }

    /// GET a resource and return its body
    pub async fn get(&self, resource: &str) -> Result<String> {
        self.execute(Method::GET, resource, None).await
    }

    /// POST a plain-text body to a resource
    pub async fn post(&self, resource: &str, body: impl Into<String>) -> Result<String> {
        self.execute(Method::POST, resource, Some(body.into())).await
    }

    /// PUT a plain-text body to a resource
    pub async fn put(&self, resource: &str, body: impl Into<String>) -> Result<String> {
        self.execute(Method::PUT, resource, Some(body.into())).await
    }

    /// DELETE a resource
    pub async fn delete(&self, resource: &str) -> Result<()> {
        self.execute(Method::DELETE, resource, None).await?;
        Ok(())
    }

    /// Build full URL from a resource path
    fn build_url(&self, resource: &str) -> String {
        if resource.starts_with("http://") || resource.starts_with("https://") {
            return resource.to_string();
        }

        let base = self.inner.config.base_url.trim_end_matches('/');
        let resource = resource.trim_start_matches('/');
        format!("{base}/{resource}")
    }
}

#[async_trait]
impl PageFetcher for WsClient {
    async fn fetch(&self, resource: &str) -> FetchOutcome {
        match self.get(resource).await {
            Ok(body) => FetchOutcome::Success(body),
            Err(e) => {
                warn!(resource, error = %e, retryable = e.is_retryable(), "Page fetch failed");
                FetchOutcome::Unavailable
            }
        }
    }
}

impl std::fmt::Debug for WsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsClient")
            .field("base_url", &self.inner.config.base_url)
            .field("credentials", &self.inner.credentials)
            .field("has_rate_limiter", &self.inner.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Map a non-success status to an error
fn status_error(status: StatusCode, body: String) -> Error {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Error::auth(format!("HTTP {}: {body}", status.as_u16()));
    }
    Error::http_status(status.as_u16(), body)
}
