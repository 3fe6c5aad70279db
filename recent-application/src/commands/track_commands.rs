use tracing::info;

use recent_domain::{
    load_record, merge_snapshot, AccountId, PlayerRecord, RecordFate, Region, SECONDS_PER_DAY,
};

use crate::{AppError, AppState, RefreshError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The record is stored with at least one snapshot.
    Tracked(PlayerRecord),
    /// Hidden profile or no battles at all; nothing worth storing.
    NothingToTrack,
}

/// Starts (or renews) tracking of a player: marks the request, takes a snapshot right
/// away and stores the record when it holds any data. A record updated within the
/// last day only gets its request marker renewed.
pub async fn track_player(
    state: &AppState,
    region: Region,
    account_id: AccountId,
    premium: bool,
    now: u64,
) -> Result<TrackOutcome, AppError> {
    let _guard = state.region_locks.lock(region).await;
    let existing = state
        .store
        .load(region, account_id)
        .await
        .map_err(RefreshError::from)?;
    let mut record = match existing {
        Some(document) => {
            load_record(account_id, region, document).map_err(RefreshError::from)?
        }
        None => PlayerRecord::new(account_id, region, now),
    };
    record.touch_request(premium, now);

    if updated_recently(&record, now) {
        state.store.save(&record).await.map_err(RefreshError::from)?;
        info!(%region, account = %account_id, "tracking renewed, snapshot is recent");
        return Ok(TrackOutcome::Tracked(record));
    }

    let payload = state
        .fetcher
        .fetch_player_stats(region, account_id)
        .await
        .map_err(RefreshError::from)?;
    let current = merge_snapshot(payload)
        .map_err(RefreshError::from)?
        .unwrap_or_default();

    let retention = state.policy.apply(&mut record, &current, now);
    match retention.fate {
        RecordFate::Keep => {
            state.store.save(&record).await.map_err(RefreshError::from)?;
            info!(%region, account = %account_id, snapshots = record.history.len(), "player tracked");
            Ok(TrackOutcome::Tracked(record))
        }
        RecordFate::Delete => {
            state
                .store
                .delete(region, account_id)
                .await
                .map_err(RefreshError::from)?;
            Ok(TrackOutcome::NothingToTrack)
        }
    }
}

fn updated_recently(record: &PlayerRecord, now: u64) -> bool {
    !record.history.is_empty()
        && record
            .last_update_at
            .is_some_and(|updated| now.saturating_sub(updated) <= SECONDS_PER_DAY)
}
