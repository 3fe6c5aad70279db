use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{info, warn};

use recent_application::commands::{track_player, TrackOutcome};
use recent_application::queries::find_snapshot;
use recent_domain::{current_unix_seconds, AccountId, Region};
use recent_infrastructure::{
    compact_regions, run_region_refresh_isolated, schedule_compaction, schedule_region_refresh,
    unix_to_utc,
};

use crate::context::AppContext;

/// Runs every region's refresh schedule and the compaction schedule until Ctrl-C or SIGTERM.
pub async fn run_daemon(context: AppContext) -> Result<()> {
    let state = context.state;
    info!(
        data_dir = %context.config.data_dir,
        regions = ?state.config.regions,
        "recent-db started"
    );

    let mut schedules = JoinSet::new();
    for &region in &state.config.regions {
        schedules.spawn(schedule_region_refresh(state.clone(), region));
    }
    schedules.spawn(schedule_compaction(state.clone()));

    shutdown_signal().await;
    info!("shutting down");
    schedules.shutdown().await;
    info!(metrics = ?state.metrics.snapshot(), "stopped");
    Ok(())
}

pub async fn refresh_once(context: AppContext, region: Region) -> Result<()> {
    let summary =
        run_region_refresh_isolated(context.state, region, current_unix_seconds()).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub async fn compact_once(context: AppContext, region: Option<Region>) -> Result<()> {
    let regions = match region {
        Some(region) => vec![region],
        None => context.state.config.regions.clone(),
    };
    let summaries = compact_regions(&context.state, &regions).await?;
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

pub async fn track(
    context: AppContext,
    region: Region,
    account_id: AccountId,
    premium: bool,
) -> Result<()> {
    let outcome = track_player(
        &context.state,
        region,
        account_id,
        premium,
        current_unix_seconds(),
    )
    .await?;
    match outcome {
        TrackOutcome::Tracked(record) => info!(
            %region,
            account = %account_id,
            snapshots = record.history.len(),
            "player tracked"
        ),
        TrackOutcome::NothingToTrack => {
            warn!(%region, account = %account_id, "hidden profile or no battles, not tracked")
        }
    }
    Ok(())
}

pub async fn show(
    context: AppContext,
    region: Region,
    account_id: AccountId,
    at: Option<u64>,
) -> Result<()> {
    let view = find_snapshot(&context.state, region, account_id, at).await?;
    info!(taken_at = %unix_to_utc(view.timestamp)?, "snapshot found");
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
