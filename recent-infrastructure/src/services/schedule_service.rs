use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Days, Utc};
use tracing::{error, info, warn};

use recent_application::commands::{
    compact_region, refresh_region, RegionCompactionSummary, RegionRefreshSummary,
};
use recent_application::{AppError, AppState};
use recent_domain::{current_unix_seconds, Region};

/// Daily refresh of one region at its configured UTC hour.
pub async fn schedule_region_refresh(state: AppState, region: Region) {
    let hour = state.config.refresh_hour(region);
    loop {
        let next = match next_run_after(Utc::now(), hour) {
            Ok(next) => next,
            Err(err) => {
                error!(%region, "refresh schedule stopped: {}", err);
                return;
            }
        };
        info!(%region, next = %next, "next refresh scheduled");
        sleep_until(next).await;

        match run_region_refresh_isolated(state.clone(), region, current_unix_seconds()).await {
            Ok(summary) => info!(%region, processed = summary.processed, "scheduled refresh done"),
            Err(err) => error!(%region, "scheduled refresh failed: {}", err),
        }
    }
}

/// Compaction of every configured region, every `compaction_interval_days`.
pub async fn schedule_compaction(state: AppState) {
    let mut next = match next_run_after(Utc::now(), state.config.compaction_hour) {
        Ok(next) => next,
        Err(err) => {
            error!("compaction schedule stopped: {}", err);
            return;
        }
    };
    loop {
        info!(next = %next, "next compaction scheduled");
        sleep_until(next).await;
        run_compaction(&state, &state.config.regions).await;

        next = match next.checked_add_days(Days::new(state.config.compaction_interval_days)) {
            Some(next) => next,
            None => {
                error!("compaction schedule overflowed");
                return;
            }
        };
    }
}

/// Compacts `regions` one after another; a failing region does not stop the others.
async fn run_compaction(state: &AppState, regions: &[Region]) {
    for &region in regions {
        match compact_region(state, region).await {
            Ok(summary) => info!(
                %region,
                processed = summary.processed,
                removed = summary.entries_removed,
                "compaction done"
            ),
            Err(err) => warn!(%region, "compaction failed: {}", err),
        }
    }
}

/// Compacts `regions` in order and stops at the first region whose pass fails.
pub async fn compact_regions(
    state: &AppState,
    regions: &[Region],
) -> Result<BTreeMap<Region, RegionCompactionSummary>, AppError> {
    let mut summaries = BTreeMap::new();
    for &region in regions {
        summaries.insert(region, compact_region(state, region).await?);
    }
    Ok(summaries)
}

/// Runs one region pass on its own OS thread and current-thread runtime, so a stuck
/// or panicking region cannot stall the others.
pub async fn run_region_refresh_isolated(
    state: AppState,
    region: Region,
    now: u64,
) -> Result<RegionRefreshSummary> {
    let worker = std::thread::Builder::new()
        .name(format!("recent-refresh-{}", region))
        .spawn(move || -> Result<RegionRefreshSummary> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .thread_name(format!("recent-refresh-{}-rt", region))
                .enable_all()
                .build()?;
            runtime
                .block_on(refresh_region(&state, region, now))
                .map_err(anyhow::Error::from)
        })?;

    tokio::task::spawn_blocking(move || worker.join())
        .await?
        .map_err(|_| anyhow!("refresh thread of {} panicked", region))?
}

/// The first `hour:00` UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32) -> Result<DateTime<Utc>> {
    let today = now
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| anyhow!("invalid hour {}", hour))?
        .and_utc();
    if today > now {
        return Ok(today);
    }
    today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| anyhow!("date out of range"))
}

async fn sleep_until(target: DateTime<Utc>) {
    let wait = target.signed_duration_since(Utc::now());
    let millis = wait.num_milliseconds().max(0) as u64;
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
