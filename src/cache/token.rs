use chrono::{DateTime, Local};

/// Access token with its absolute expiry, as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Local>,
}

impl CachedToken {
    pub fn new(value: String, expires_at: DateTime<Local>) -> Self {
        Self { value, expires_at }
    }
}
