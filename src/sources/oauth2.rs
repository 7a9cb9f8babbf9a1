use anyhow::{anyhow, Result};
use reqwest::Client;
use tracing::{error, info};

use crate::cache::token::CachedToken;
use crate::config::sources::{AuthConfig, Credentials, ExpirationSourceFormat};
use crate::helpers::time::{get_instant, now_local};
use crate::observability::metrics::get_metrics;
use crate::parser::parser::parse_auth_response;
use crate::sources::FetchToken;

/// Client-credentials exchange against the authorization endpoint
#[derive(Debug, Clone)]
pub struct OAuth2Source {
    pub url: String,
    pub expiry_format: ExpirationSourceFormat,
    pub client: Client,
}

impl OAuth2Source {
    pub fn new(cfg: &AuthConfig, client: Client) -> Self {
        Self {
            url: cfg.url.to_owned(),
            expiry_format: cfg.expiry_format,
            client,
        }
    }

    async fn request_token(&self, credentials: &Credentials) -> Result<CachedToken> {
        let metrics = get_metrics().await;
        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await
            .inspect_err(|_| {
                metrics.token_fetch_failures.with_label_values(&["transport"]).inc();
            })
            .map_err(|e| anyhow!("token request to '{}' failed: {}", self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            metrics.token_fetch_failures.with_label_values(&["status"]).inc();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("OAuth2 token request failed: {} {}", status, body.trim()));
        }

        let body = response.text().await?;
        parse_auth_response(&body, self.expiry_format, now_local()).inspect_err(|_| {
            metrics.parse_failures.inc();
            metrics.token_fetch_failures.with_label_values(&["parse"]).inc();
        })
    }
}

impl FetchToken for OAuth2Source {
    async fn fetch_token(&self, credentials: &Credentials) -> Result<CachedToken> {
        let metrics = get_metrics().await;
        let start = get_instant();
        metrics.token_fetch_requests.inc();

        let result = self.request_token(credentials).await;
        metrics
            .token_fetch_duration
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(token) => info!("fetched new access token, expires at {}", token.expires_at),
            Err(e) => error!("fetching access token failed: {:#}", e),
        }
        result
    }
}
