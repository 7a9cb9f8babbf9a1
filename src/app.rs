use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::cache::token_store::TokenStore;
use crate::config::sources::ServiceConfig;
use crate::helpers::time::{seconds, today};
use crate::observability::metrics::get_metrics;
use crate::observability::textfile;
use crate::sinks::console;
use crate::sources::build_client;
use crate::sources::events::EventsSource;
use crate::sources::oauth2::OAuth2Source;
use crate::sources::provider::AccessTokenProvider;

/// One fetch-and-print pass. Returns the number of gigs written to `out`.
///
/// The metrics textfile, when configured, is written whether the pass succeeds or not.
pub async fn run<W: Write>(service_config: &ServiceConfig, out: &mut W) -> Result<usize> {
    let result = fetch_and_print(service_config, out).await;

    // -------------------------------
    // 4. Metrics
    // -------------------------------

    if let Err(e) = export_metrics(service_config).await {
        warn!("failed to export metrics: {:#}", e);
    }

    if let Ok(count) = &result {
        info!("done, {} gigs listed", count);
    }
    result
}

/// Dump the registry to `settings.metrics.textfile_path`, if set.
pub async fn export_metrics(service_config: &ServiceConfig) -> Result<()> {
    match &service_config.settings.metrics.textfile_path {
        Some(path) => textfile::write(&get_metrics().await.registry, Path::new(path)).await,
        None => Ok(()),
    }
}

async fn fetch_and_print<W: Write>(service_config: &ServiceConfig, out: &mut W) -> Result<usize> {
    // -------------------------------
    // 1. Create request client
    // -------------------------------

    let client = build_client(&service_config.settings.http)?;

    // -------------------------------
    // 2. Obtain access token (cache or auth endpoint)
    // -------------------------------

    let provider = AccessTokenProvider::new(
        TokenStore::new(&service_config.cache.path),
        OAuth2Source::new(&service_config.auth, client.clone()),
        seconds(service_config.cache.safety_margin_seconds),
    );
    let token = provider.get_token(&service_config.auth.credentials()).await?;

    // -------------------------------
    // 3. Fetch and print gigs
    // -------------------------------

    let events = EventsSource::new(service_config.events.clone(), client);
    let gigs = events.fetch_gigs(&token, today()).await?;
    console::write_gigs(out, &gigs)?;

    Ok(gigs.len())
}
