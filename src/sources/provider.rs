use anyhow::Result;
use chrono::TimeDelta;
use tracing::{info, warn};

use crate::cache::token_store::TokenStore;
use crate::cache::token_validator::is_valid;
use crate::config::sources::Credentials;
use crate::helpers::time::now_local;
use crate::observability::metrics::get_metrics;
use crate::sources::FetchToken;

/// Hands out a usable access token, reusing the stored one while it is valid.
#[derive(Debug, Clone)]
pub struct AccessTokenProvider<F> {
    store: TokenStore,
    fetcher: F,
    safety_margin: TimeDelta,
}

impl<F: FetchToken> AccessTokenProvider<F> {
    pub fn new(store: TokenStore, fetcher: F, safety_margin: TimeDelta) -> Self {
        Self { store, fetcher, safety_margin }
    }

    pub async fn get_token(&self, credentials: &Credentials) -> Result<String> {
        let metrics = get_metrics().await;

        if let Some(cached) = self.store.load().await {
            if is_valid(&cached, now_local(), self.safety_margin) {
                metrics.token_cache_hits.inc();
                info!("using cached token, expires at {}", cached.expires_at);
                return Ok(cached.value);
            }
            info!("cached token expires at {}, refreshing", cached.expires_at);
        }
        metrics.token_cache_misses.inc();

        let token = self.fetcher.fetch_token(credentials).await?;
        // the fresh token is still usable for this run
        if let Err(e) = self.store.save(&token).await {
            warn!("failed to persist token: {:#}", e);
        }
        Ok(token.value)
    }
}
