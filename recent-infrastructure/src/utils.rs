use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use recent_domain::AccountId;

/// `<account_id>.json` file names; anything else in a region directory is ignored.
pub fn parse_record_file_name(path: &Path) -> Option<AccountId> {
    if path.extension()?.to_str()? != "json" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok().map(AccountId)
}

pub fn unix_to_utc(seconds: u64) -> Result<DateTime<Utc>> {
    let seconds = i64::try_from(seconds)?;
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| anyhow!("timestamp {} out of range", seconds))
}
