// Legacy format migrator
// Rewrites stored documents into the canonical layout; safe to run any number of times

use std::collections::BTreeMap;

use crate::entities::{
    ActivityMarker, History, ModeStats, PlayerDocument, PlayerRecord, RawShipEntry, RawSnapshot,
    ShipSnapshot, StoredActivityMarker, LEGACY_PREMIUM_TAG,
};
use crate::error::DomainError;
use crate::services::normalizer::{normalize_stat_block, recorded_battles, rename_legacy_battles};
use crate::value_objects::{AccountId, Mode, Region, ShipId};

pub fn migrate(mut document: PlayerDocument) -> PlayerDocument {
    document.last_request = migrate_marker(document.last_request);
    document.data = migrate_history(document.data);
    document
}

fn migrate_marker(marker: StoredActivityMarker) -> StoredActivityMarker {
    match marker {
        StoredActivityMarker::Timestamp(timestamp) => {
            StoredActivityMarker::Canonical(ActivityMarker::Normal(timestamp))
        }
        StoredActivityMarker::Tag(tag) if tag == LEGACY_PREMIUM_TAG => {
            StoredActivityMarker::Canonical(ActivityMarker::Premium)
        }
        other => other,
    }
}

// Zero-battle modes go first, then ships and dates left empty by that.
fn migrate_history(data: BTreeMap<String, RawSnapshot>) -> BTreeMap<String, RawSnapshot> {
    data.into_iter()
        .filter_map(|(date, snapshot)| {
            let ships = snapshot
                .into_iter()
                .filter_map(|(ship_id, modes)| {
                    let modes = modes
                        .into_iter()
                        .filter_map(|(mode, mut raw)| {
                            rename_legacy_battles(&mut raw);
                            (recorded_battles(&raw) != Some(0)).then_some((mode, raw))
                        })
                        .collect::<RawShipEntry>();
                    (!modes.is_empty()).then_some((ship_id, modes))
                })
                .collect::<RawSnapshot>();
            (!ships.is_empty()).then_some((date, ships))
        })
        .collect()
}

/// Typed view of an already migrated document.
pub fn into_record(
    account_id: AccountId,
    region: Region,
    document: PlayerDocument,
) -> Result<PlayerRecord, DomainError> {
    let activity = match document.last_request {
        StoredActivityMarker::Canonical(marker) => marker,
        StoredActivityMarker::Timestamp(_) => {
            return Err(DomainError::schema("activity marker still in legacy form"))
        }
        StoredActivityMarker::Tag(tag) => {
            return Err(DomainError::schema(format!("unknown activity marker `{tag}`")))
        }
    };

    let mut history = History::new();
    for (date, ships) in document.data {
        let timestamp = date
            .parse::<u64>()
            .map_err(|_| DomainError::schema(format!("snapshot key `{date}` is not a timestamp")))?;
        history.insert(timestamp, parse_snapshot(&date, ships)?);
    }

    Ok(PlayerRecord {
        account_id,
        region,
        activity,
        last_update_at: document.last_update_at,
        history,
    })
}

/// Migration followed by the typed conversion; what every record load goes through.
pub fn load_record(
    account_id: AccountId,
    region: Region,
    document: PlayerDocument,
) -> Result<PlayerRecord, DomainError> {
    into_record(account_id, region, migrate(document))
}

fn parse_snapshot(date: &str, ships: RawSnapshot) -> Result<ShipSnapshot, DomainError> {
    if ships.is_empty() {
        return Err(DomainError::schema(format!("empty snapshot at {date}")));
    }
    let mut snapshot = ShipSnapshot::new();
    for (ship, modes) in ships {
        let ship_id = ship
            .parse::<u64>()
            .map(ShipId)
            .map_err(|_| DomainError::schema(format!("ship key `{ship}` is not an id")))?;
        if modes.is_empty() {
            return Err(DomainError::schema(format!("ship {ship} at {date} has no modes")));
        }
        let mut stats = ModeStats::new();
        for (name, raw) in modes {
            let mode = Mode::parse(&name)
                .ok_or_else(|| DomainError::schema(format!("unknown mode `{name}`")))?;
            let block = normalize_stat_block(&name, raw)
                .map_err(|err| DomainError::schema(format!("ship {ship} at {date}: {err}")))?
                .ok_or_else(|| {
                    DomainError::schema(format!("ship {ship} at {date} has a zero-battle {name}"))
                })?;
            stats.insert(mode, block);
        }
        snapshot.insert_ship(ship_id, stats);
    }
    Ok(snapshot)
}
