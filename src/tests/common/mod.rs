// tests/common/mod.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::TimeDelta;
use reqwest::Client;
use tempfile::TempDir;

use crate::cache::token::CachedToken;
use crate::cache::token_store::TokenStore;
use crate::config::sources::Credentials;
use crate::helpers::time::now_local;
use crate::sources::FetchToken;

/// Store backed by a fresh temp dir; keep the `TempDir` alive for the test.
pub fn temp_store() -> (TempDir, TokenStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TokenStore::new(dir.path().join("token.txt"));
    (dir, store)
}

pub fn token_expiring_in(value: &str, ttl: TimeDelta) -> CachedToken {
    CachedToken::new(value.to_owned(), now_local() + ttl)
}

pub fn credentials() -> Credentials {
    Credentials::new("test-id".to_owned(), "test-secret".to_owned())
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Fetcher that hands out a fixed token and counts calls.
#[derive(Clone)]
pub struct CountingFetcher {
    pub calls: Arc<AtomicUsize>,
    pub token: Option<CachedToken>,
}

impl CountingFetcher {
    pub fn returning(token: CachedToken) -> Self {
        Self { calls: Arc::new(AtomicUsize::new(0)), token: Some(token) }
    }

    pub fn failing() -> Self {
        Self { calls: Arc::new(AtomicUsize::new(0)), token: None }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FetchToken for CountingFetcher {
    async fn fetch_token(&self, _credentials: &Credentials) -> Result<CachedToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.token.clone().ok_or_else(|| anyhow!("auth server unavailable"))
    }
}
