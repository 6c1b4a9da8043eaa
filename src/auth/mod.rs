//! Authentication module
//!
//! The web services authenticate every call with HTTP Basic credentials.
//! `Credentials` holds the username/password pair and applies it to
//! outgoing requests.

mod credentials;

pub use credentials::Credentials;
