//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Checks credentials, endpoint URLs, cache invariants, query bounds and logging

use tracing::{error, info};

use crate::config::settings::SettingsConfig;
use crate::config::sources::{AuthConfig, CacheConfig, EventsConfig, ServiceConfig};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_auth(&cfg.auth, &mut errors);
    validate_cache(&cfg.cache, &mut errors);
    validate_events(&cfg.events, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.http.timeout_ms == 0 {
        errors.push("settings.http.timeout_ms must be > 0".to_string());
    }

    if let Some(path) = &settings.metrics.textfile_path {
        if path.trim().is_empty() {
            errors.push("settings.metrics.textfile_path must not be empty when set".to_string());
        }
    }

    if let Some(logging) = &settings.logging {
        if !VALID_LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, VALID_LOG_LEVELS
            ));
        }
    }
}

fn validate_auth(auth: &AuthConfig, errors: &mut Vec<String>) {
    if auth.url.trim().is_empty() {
        errors.push("auth.url cannot be empty".to_string());
    }
    if auth.client_id.trim().is_empty() {
        errors.push("auth.client_id cannot be empty (set ENTS24_CLIENT_ID or --client-id)".to_string());
    }
    if auth.client_secret.trim().is_empty() {
        errors.push("auth.client_secret cannot be empty (set ENTS24_CLIENT_SECRET or --client-secret)".to_string());
    }
}

fn validate_cache(cache: &CacheConfig, errors: &mut Vec<String>) {
    if cache.path.trim().is_empty() {
        errors.push("cache.path cannot be empty".to_string());
    }
    if cache.safety_margin_seconds > 60 * 60 * 24 * 365 {
        errors.push(format!(
            "cache.safety_margin_seconds ({}) is unreasonably large",
            cache.safety_margin_seconds
        ));
    }
}

fn validate_events(events: &EventsConfig, errors: &mut Vec<String>) {
    if events.url.trim().is_empty() {
        errors.push("events.url cannot be empty".to_string());
    }
    if !(-90.0..=90.0).contains(&events.location.lat) {
        errors.push(format!("events.location.lat ({}) must be within -90..=90", events.location.lat));
    }
    if !(-180.0..=180.0).contains(&events.location.lon) {
        errors.push(format!("events.location.lon ({}) must be within -180..=180", events.location.lon));
    }
    if events.radius_distance == 0 {
        errors.push("events.radius_distance must be > 0".to_string());
    }
    match events.distance_unit.as_str() {
        "mi" | "km" => {}
        u => errors.push(format!("events.distance_unit '{}' must be 'mi' or 'km'", u)),
    }
    if events.period_months == 0 {
        errors.push("events.period_months must be > 0".to_string());
    }
    match events.order_direction.as_str() {
        "asc" | "desc" => {}
        d => errors.push(format!("events.order_direction '{}' must be 'asc' or 'desc'", d)),
    }
    if events.results_per_page == 0 {
        errors.push("events.results_per_page must be > 0".to_string());
    }
    if let Some(scheme) = &events.authorization_scheme {
        if scheme.trim().is_empty() || scheme.contains(char::is_whitespace) {
            errors.push(format!(
                "events.authorization_scheme '{}' must be a single word, e.g. 'Bearer'",
                scheme
            ));
        }
    }
}
