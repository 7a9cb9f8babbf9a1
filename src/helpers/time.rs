use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Months, NaiveDate, TimeDelta};
use tokio::time::Instant;

pub fn now_local() -> DateTime<Local> {
    Local::now()
}

pub fn today() -> NaiveDate {
    now_local().date_naive()
}

/// Epoch seconds (UTC) as local wall-clock time.
pub fn unix_to_local(unix_ts: i64) -> Result<DateTime<Local>> {
    DateTime::from_timestamp(unix_ts, 0)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| anyhow!("unix timestamp {} is out of range", unix_ts))
}

pub fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}

/// `date + months`, clamped to the end of the month (Feb 29 + 12 months = Feb 28).
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| anyhow!("{} + {} months is out of range", date, months))
}

pub fn get_instant() -> Instant {
    Instant::now()
}
