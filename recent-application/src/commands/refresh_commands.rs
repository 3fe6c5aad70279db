use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use recent_domain::{
    load_record, merge_snapshot, AccountId, RecordFate, Region, RetentionOutcome, ShipSnapshot,
};

use crate::{AppError, AppState, RefreshError};

/// Where this cycle's snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Fetched,
    HiddenProfile,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRefresh {
    pub source: SnapshotSource,
    pub retention: RetentionOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionRefreshSummary {
    pub processed: usize,
    pub saved: usize,
    pub inserted: usize,
    pub deleted: usize,
    pub inactive: usize,
    pub hidden: usize,
    pub skipped: usize,
}

impl RegionRefreshSummary {
    fn record(&mut self, refresh: &PlayerRefresh) {
        self.processed += 1;
        match refresh.retention.fate {
            RecordFate::Keep => self.saved += 1,
            RecordFate::Delete => self.deleted += 1,
        }
        if refresh.retention.inserted {
            self.inserted += 1;
        }
        match refresh.source {
            SnapshotSource::Fetched => {}
            SnapshotSource::HiddenProfile => self.hidden += 1,
            SnapshotSource::Inactive => self.inactive += 1,
        }
    }
}

/// One load → migrate → fetch → retain → save-or-delete cycle.
/// `Ok(None)` when the player is not tracked in `region`.
pub async fn refresh_player(
    state: &AppState,
    region: Region,
    account_id: AccountId,
    now: u64,
) -> Result<Option<PlayerRefresh>, RefreshError> {
    let Some(document) = state.store.load(region, account_id).await? else {
        return Ok(None);
    };
    let mut record = load_record(account_id, region, document)?;

    let (source, current) = if state.policy.is_active(record.activity, now) {
        let payload = state.fetcher.fetch_player_stats(region, account_id).await?;
        match merge_snapshot(payload)? {
            Some(snapshot) => (SnapshotSource::Fetched, snapshot),
            None => {
                debug!(%region, account = %account_id, "hidden profile, no snapshot this cycle");
                (SnapshotSource::HiddenProfile, ShipSnapshot::new())
            }
        }
    } else {
        (SnapshotSource::Inactive, ShipSnapshot::new())
    };

    let retention = state.policy.apply(&mut record, &current, now);
    match retention.fate {
        RecordFate::Keep => state.store.save(&record).await?,
        RecordFate::Delete => {
            state.store.delete(region, account_id).await?;
            state.metrics.record_deleted();
            info!(%region, account = %account_id, "no snapshots left, record removed");
        }
    }
    state.metrics.record_refresh(retention.inserted);

    Ok(Some(PlayerRefresh { source, retention }))
}

/// Refreshes every stored player of `region`. A failing player is logged and skipped;
/// a failing store aborts the pass.
pub async fn refresh_region(
    state: &AppState,
    region: Region,
    now: u64,
) -> Result<RegionRefreshSummary, AppError> {
    let _guard = state.region_locks.lock(region).await;
    let started = Instant::now();
    let accounts = state
        .store
        .list_accounts(region)
        .await
        .map_err(RefreshError::from)?;

    let mut summary = RegionRefreshSummary::default();
    for account_id in accounts {
        match refresh_player(state, region, account_id, now).await {
            Ok(Some(refresh)) => summary.record(&refresh),
            Ok(None) => {}
            Err(err) if err.is_fatal() => {
                error!(%region, account = %account_id, "aborting refresh: {}", err);
                return Err(err.into());
            }
            Err(err) => {
                warn!(%region, account = %account_id, "skipping player: {}", err);
                summary.skipped += 1;
                state.metrics.record_skip();
            }
        }
    }

    info!(
        %region,
        processed = summary.processed,
        saved = summary.saved,
        inserted = summary.inserted,
        deleted = summary.deleted,
        skipped = summary.skipped,
        elapsed_secs = started.elapsed().as_secs(),
        "region refreshed"
    );
    Ok(summary)
}
