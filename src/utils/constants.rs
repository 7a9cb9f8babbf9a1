//! Shared constants and invariants

pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_CONFIG_PATH: &str = "gig-finder.yaml";
pub const DEFAULT_CACHE_PATH: &str = "token.txt";

// Ents24 endpoints
pub const DEFAULT_AUTH_URL: &str = "https://api.ents24.com/auth/token";
pub const DEFAULT_EVENTS_URL: &str = "https://api.ents24.com/event/list";

// Brighton
pub const DEFAULT_LAT: f64 = 50.842503343891;
pub const DEFAULT_LON: f64 = -0.13203927625894;
