use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, TimeDelta};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::token::CachedToken;
use crate::config::sources::ExpirationSourceFormat;
use crate::helpers::time::unix_to_local;
use crate::model::Gig;

/// Authorization endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// unix timestamp, seconds
    pub expires: Option<i64>,
    /// seconds from now
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

/// Parse the auth response body into a token with an absolute expiry.
///
/// `format` names the field the expiry is taken from; there is no fallback
/// to the other one.
pub fn parse_auth_response(
    body: &str,
    format: ExpirationSourceFormat,
    now: DateTime<Local>,
) -> Result<CachedToken> {
    let response: AuthResponse =
        serde_json::from_str(body).context("auth response is not the expected JSON")?;

    if response.access_token.is_empty() {
        return Err(anyhow!("auth response carries an empty access_token"));
    }
    if response.access_token.contains(['\n', '\r']) {
        return Err(anyhow!("auth response access_token contains a line break"));
    }

    let expires_at = match format {
        ExpirationSourceFormat::Unix => {
            let expires = response
                .expires
                .filter(|ts| *ts > 0)
                .ok_or_else(|| anyhow!("auth response has no positive 'expires' field"))?;
            unix_to_local(expires)?
        }
        ExpirationSourceFormat::Seconds => {
            let expires_in = response
                .expires_in
                .filter(|secs| *secs > 0)
                .ok_or_else(|| anyhow!("auth response has no positive 'expires_in' field"))?;
            TimeDelta::try_seconds(expires_in)
                .and_then(|ttl| now.checked_add_signed(ttl))
                .ok_or_else(|| anyhow!("expires_in {} is out of range", expires_in))?
        }
    };

    if expires_at <= now {
        warn!(expires_at = %expires_at, "auth server returned an already expired token");
    }
    debug!(
        token_type = response.token_type.as_deref().unwrap_or(""),
        expires_at = %expires_at,
        "auth response parsed"
    );

    Ok(CachedToken::new(response.access_token, expires_at))
}

/// Parse the event-list body, a JSON array of gigs.
pub fn parse_gigs(body: &str) -> Result<Vec<Gig>> {
    serde_json::from_str::<Vec<Gig>>(body).context("event list is not a JSON array of events")
}
