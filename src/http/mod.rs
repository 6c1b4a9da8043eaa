//! HTTP client module
//!
//! The request executor the rest of the crate is built on.
//!
//! # Features
//!
//! - **Basic Authentication**: credentials applied to every request
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Uniform Failures**: non-2xx answers become `Error::HttpStatus`, and
//!   the `PageFetcher` impl collapses every failure into `Unavailable`

mod client;
mod rate_limit;

pub use client::WsClient;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
