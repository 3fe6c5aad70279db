use time::OffsetDateTime;

pub const SECONDS_PER_DAY: u64 = 86_400;

pub fn current_unix_seconds() -> u64 {
    u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or_default()
}

pub fn days_to_seconds(days: u64) -> u64 {
    days.saturating_mul(SECONDS_PER_DAY)
}
