use std::path::Path;
use crate::config::settings::{LogFormat, LoggingConfig};
use crate::config::sources::ServiceConfig;
use crate::observability::metrics::get_metrics;
use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error, info};

/// Load config from YAML file. A missing file yields the built-in defaults.
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        info!("config file '{}' not found, using defaults", path.display());
        return Ok(apply_defaults(ServiceConfig::default()));
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config '{}'", path.display()))?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    if content.trim().is_empty() {
        debug!("config is empty, using defaults");
        return Ok(apply_defaults(ServiceConfig::default()));
    }

    let metrics = get_metrics().await;
    let service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
            metrics.parse_failures.inc();
        })?;

    Ok(apply_defaults(service_config))
}

fn apply_defaults(mut service_config: ServiceConfig) -> ServiceConfig {
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::Compact));
    }
    service_config
}

/// Replace `${VAR}` and `${VAR:default}` with values from the process environment.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.to_string())
}
