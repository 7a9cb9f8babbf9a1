use serde::Deserialize;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::*;


/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

/// ================================
/// Authorization endpoint
/// ================================
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_auth_url")]
    pub url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    /// which response field carries the expiry
    #[serde(default)]
    pub expiry_format: ExpirationSourceFormat,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: default_auth_url(),
            client_id: String::new(),
            client_secret: String::new(),
            expiry_format: ExpirationSourceFormat::default(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("expiry_format", &self.expiry_format)
            .finish()
    }
}

impl AuthConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.client_id.to_owned(), self.client_secret.to_owned())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationSourceFormat {
    /// `expires`: unix timestamp (integer seconds since epoch, UTC)
    #[default]
    Unix,

    /// `expires_in`: duration in seconds until expiration.
    Seconds,
}

/// Client credentials sent to the authorization endpoint
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self { client_id, client_secret }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// ================================
/// Local token cache
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: String,
    #[serde(default = "default_safety_margin_seconds")]
    pub safety_margin_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            safety_margin_seconds: default_safety_margin_seconds(),
        }
    }
}

/// ================================
/// Event-list endpoint
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct EventsConfig {
    #[serde(default = "default_events_url")]
    pub url: String,
    #[serde(default)]
    pub location: GeoPoint,
    #[serde(default = "default_radius_distance")]
    pub radius_distance: u32,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
    /// date_to = today + period_months
    #[serde(default = "default_period_months")]
    pub period_months: u32,
    #[serde(default)]
    pub include_image: bool,
    #[serde(default = "default_order_by")]
    pub order_by: String,
    #[serde(default = "default_order_direction")]
    pub order_direction: String,
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,
    /// None sends the raw token in `Authorization`
    pub authorization_scheme: Option<String>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            url: default_events_url(),
            location: GeoPoint::default(),
            radius_distance: default_radius_distance(),
            distance_unit: default_distance_unit(),
            period_months: default_period_months(),
            include_image: false,
            order_by: default_order_by(),
            order_direction: default_order_direction(),
            results_per_page: default_results_per_page(),
            authorization_scheme: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self { lat: DEFAULT_LAT, lon: DEFAULT_LON }
    }
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_cache_path() -> String {
    DEFAULT_CACHE_PATH.to_string()
}

fn default_safety_margin_seconds() -> u64 {
    DEFAULT_SAFETY_MARGIN_SECS
}

fn default_events_url() -> String {
    DEFAULT_EVENTS_URL.to_string()
}

fn default_radius_distance() -> u32 {
    15
}

fn default_distance_unit() -> String {
    "mi".to_string()
}

fn default_period_months() -> u32 {
    12
}

fn default_order_by() -> String {
    "lastUpdate".to_string()
}

fn default_order_direction() -> String {
    "desc".to_string()
}

fn default_results_per_page() -> u32 {
    100
}
