//! Sources module
//!
//! The two remote endpoints (authorization and event list) and the
//! provider that decides when the authorization endpoint must be called.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::cache::token::CachedToken;
use crate::config::settings::HttpConfig;
use crate::config::sources::Credentials;

pub mod events;
pub mod oauth2;
pub mod provider;

/// One-shot credential exchange. No caching responsibility.
pub trait FetchToken {
    fn fetch_token(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<CachedToken>> + Send;
}

/// Shared client; every request is bounded by `timeout_ms`.
pub fn build_client(http: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(http.timeout_ms))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")
}
