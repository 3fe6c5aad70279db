use std::time::Instant;

use serde::Serialize;
use tracing::{error, info, warn};

use recent_domain::{compact, load_record, AccountId, Region};

use crate::{AppError, AppState, RefreshError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCompaction {
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionCompactionSummary {
    pub processed: usize,
    pub entries_removed: usize,
    pub deleted: usize,
    pub skipped: usize,
}

/// Migrates one stored record and drops every snapshot superseded by an identical
/// later one. The migrated form is written back even when nothing was compacted.
pub async fn compact_player(
    state: &AppState,
    region: Region,
    account_id: AccountId,
) -> Result<Option<PlayerCompaction>, RefreshError> {
    let Some(document) = state.store.load(region, account_id).await? else {
        return Ok(None);
    };
    let mut record = load_record(account_id, region, document)?;

    let before = record.history.len();
    record.history = compact(&record.history);
    let after = record.history.len();

    if record.history.is_empty() {
        state.store.delete(region, account_id).await?;
        state.metrics.record_deleted();
    } else {
        state.store.save(&record).await?;
    }
    state.metrics.record_compacted(before - after);

    Ok(Some(PlayerCompaction { before, after }))
}

pub async fn compact_region(
    state: &AppState,
    region: Region,
) -> Result<RegionCompactionSummary, AppError> {
    let _guard = state.region_locks.lock(region).await;
    let started = Instant::now();
    let accounts = state
        .store
        .list_accounts(region)
        .await
        .map_err(RefreshError::from)?;

    let mut summary = RegionCompactionSummary::default();
    for account_id in accounts {
        match compact_player(state, region, account_id).await {
            Ok(Some(compaction)) => {
                summary.processed += 1;
                summary.entries_removed += compaction.before - compaction.after;
                if compaction.after == 0 {
                    summary.deleted += 1;
                }
            }
            Ok(None) => {}
            Err(err) if err.is_fatal() => {
                error!(%region, account = %account_id, "aborting compaction: {}", err);
                return Err(err.into());
            }
            Err(err) => {
                warn!(%region, account = %account_id, "skipping compaction: {}", err);
                summary.skipped += 1;
                state.metrics.record_skip();
            }
        }
    }

    info!(
        %region,
        processed = summary.processed,
        entries_removed = summary.entries_removed,
        deleted = summary.deleted,
        skipped = summary.skipped,
        elapsed_secs = started.elapsed().as_secs(),
        "region compacted"
    );
    Ok(summary)
}
