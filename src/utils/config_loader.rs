use std::path::Path;
use anyhow::{anyhow, Result};
use tracing::warn;

use crate::ServiceConfig;
use crate::config::proc_loader::file_to_config;
use crate::config::proc_validator::validate_service_config;
use crate::observability::metrics::get_metrics;
use crate::observability::textfile;

/// Values supplied on the command line (or their env fallbacks) win over the file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

pub async fn run(config_path: &str, overrides: ConfigOverrides) -> Result<ServiceConfig> {
    let path = Path::new(config_path);
    let mut service_config = file_to_config(path)
        .await
        .map_err(|e| anyhow!(format!("Invalid config format: {}", e)))?;

    if let Some(client_id) = overrides.client_id {
        service_config.auth.client_id = client_id;
    }
    if let Some(client_secret) = overrides.client_secret {
        service_config.auth.client_secret = client_secret;
    }

    if let Err(errors) = validate_service_config(&service_config) {
        let metrics = get_metrics().await;
        metrics.config_validation_errors.inc();
        // still export, so a broken deployment shows up in the textfile
        if let Some(path) = &service_config.settings.metrics.textfile_path {
            if let Err(e) = textfile::write(&metrics.registry, Path::new(path)).await {
                warn!("failed to export metrics: {:#}", e);
            }
        }
        return Err(anyhow!(
            "config is not valid, total errors:{}, \n{}",
            errors.len(),
            errors.join("\n")
        ));
    }
    Ok(service_config)
}
