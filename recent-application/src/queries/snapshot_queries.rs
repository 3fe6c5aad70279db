use serde::Serialize;

use recent_domain::{load_record, AccountId, ActivityMarker, Region, ShipSnapshot};

use crate::{AppError, AppState, RefreshError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotView {
    pub account_id: AccountId,
    pub region: Region,
    pub activity: ActivityMarker,
    pub last_update_at: Option<u64>,
    pub timestamp: u64,
    /// Older dates a caller could compare against.
    pub available_dates: Vec<u64>,
    pub snapshot: ShipSnapshot,
}

/// The snapshot at `at` (or the next one after it); the latest one when `at` is `None`.
pub async fn find_snapshot(
    state: &AppState,
    region: Region,
    account_id: AccountId,
    at: Option<u64>,
) -> Result<SnapshotView, AppError> {
    let document = state
        .store
        .load(region, account_id)
        .await
        .map_err(RefreshError::from)?
        .ok_or_else(|| AppError::NotFound(format!("player {account_id} in {region}")))?;
    let record = load_record(account_id, region, document).map_err(RefreshError::from)?;

    let found = match at {
        Some(timestamp) => record.snapshot_at(timestamp),
        None => record.latest_snapshot(),
    };
    let (timestamp, snapshot) = found.ok_or_else(|| {
        AppError::NotFound(format!("no snapshot of player {account_id} in {region}"))
    })?;

    Ok(SnapshotView {
        account_id,
        region,
        activity: record.activity,
        last_update_at: record.last_update_at,
        timestamp,
        available_dates: record.available_dates(timestamp),
        snapshot: snapshot.clone(),
    })
}
