use chrono::{DateTime, Local, TimeDelta};

use crate::cache::token::CachedToken;

/// A token is usable while `now` is strictly before `expires_at - safety_margin`.
pub fn is_valid(token: &CachedToken, now: DateTime<Local>, safety_margin: TimeDelta) -> bool {
    match token.expires_at.checked_sub_signed(safety_margin) {
        Some(refresh_at) => now < refresh_at,
        None => false,
    }
}
