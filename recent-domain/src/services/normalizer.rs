// Stat block normalizer
// Trims a raw per-mode payload down to the canonical field set

use serde_json::Value;

use crate::entities::{RawModeStats, StatBlock, BATTLES_FIELD, LEGACY_BATTLES_FIELD};
use crate::error::DomainError;

/// Moves a legacy `battles` count under `battles_count`, replacing any value already there.
pub fn rename_legacy_battles(raw: &mut RawModeStats) {
    if let Some(value) = raw.remove(LEGACY_BATTLES_FIELD) {
        raw.insert(BATTLES_FIELD.to_string(), value);
    }
}

/// Battle count of a raw block; a missing count means the provider sent an empty block.
/// `None` when the count is present but not a non-negative integer.
pub fn recorded_battles(raw: &RawModeStats) -> Option<u64> {
    match raw.get(BATTLES_FIELD) {
        None | Some(Value::Null) => Some(0),
        Some(value) => value.as_u64(),
    }
}

/// Canonical stat block of one mode, or `None` when the mode recorded no battles.
pub fn normalize_stat_block(
    mode: &str,
    mut raw: RawModeStats,
) -> Result<Option<StatBlock>, DomainError> {
    rename_legacy_battles(&mut raw);
    let battles_count =
        recorded_battles(&raw).ok_or_else(|| DomainError::malformed(mode, BATTLES_FIELD))?;
    if battles_count == 0 {
        return Ok(None);
    }

    let count = |field: &str| {
        raw.get(field)
            .and_then(Value::as_u64)
            .ok_or_else(|| DomainError::malformed(mode, field))
    };
    let original_exp = match raw.get("original_exp") {
        Some(Value::Number(number)) => number.clone(),
        _ => return Err(DomainError::malformed(mode, "original_exp")),
    };

    Ok(Some(StatBlock {
        battles_count,
        wins: count("wins")?,
        damage_dealt: count("damage_dealt")?,
        frags: count("frags")?,
        planes_killed: count("planes_killed")?,
        original_exp,
        art_agro: count("art_agro")?,
        scouting_damage: count("scouting_damage")?,
        shots_by_main: count("shots_by_main")?,
        hits_by_main: count("hits_by_main")?,
    }))
}
