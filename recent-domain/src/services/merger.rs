// Snapshot merger
// Folds the overall response and the four submode responses into one snapshot

use crate::entities::{ModeStats, PlayerStatsPayload, ShipSnapshot};
use crate::error::DomainError;
use crate::services::normalizer::normalize_stat_block;
use crate::value_objects::Mode;

/// `Ok(None)` for hidden profiles. An empty snapshot means no battles in any tracked mode.
pub fn merge_snapshot(payload: PlayerStatsPayload) -> Result<Option<ShipSnapshot>, DomainError> {
    if payload.hidden_profile {
        return Ok(None);
    }

    let PlayerStatsPayload {
        overall,
        mut submodes,
        ..
    } = payload;

    let mut snapshot = ShipSnapshot::new();
    for (ship_id, mut entry) in overall {
        for mode in Mode::SUBMODES {
            let sub_entry = submodes
                .get_mut(&mode)
                .and_then(|ships| ships.get_mut(&ship_id))
                .and_then(|modes| modes.remove(mode.as_str()));
            if let Some(raw) = sub_entry {
                entry.insert(mode.as_str().to_string(), raw);
            }
        }

        let mut modes = ModeStats::new();
        for (name, raw) in entry {
            let Some(mode) = Mode::parse(&name) else {
                continue;
            };
            if let Some(block) = normalize_stat_block(mode.as_str(), raw)? {
                modes.insert(mode, block);
            }
        }
        snapshot.insert_ship(ship_id, modes);
    }

    Ok(Some(snapshot))
}
