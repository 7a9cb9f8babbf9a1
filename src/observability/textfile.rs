use std::path::Path;

use anyhow::{Context, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::info;

/// Render the registry in the prometheus text exposition format.
pub fn render(registry: &Registry) -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Dump the registry for a node-exporter textfile collector.
pub async fn write(registry: &Registry, path: &Path) -> Result<()> {
    let body = render(registry)?;
    let tmp = path.with_extension("prom.tmp");
    tokio::fs::write(&tmp, body.as_bytes())
        .await
        .with_context(|| format!("failed to write '{}'", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to move metrics into '{}'", path.display()))?;
    info!("metrics written to '{}'", path.display());
    Ok(())
}
