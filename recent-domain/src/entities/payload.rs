// Upstream payload entity
// Everything one fetch cycle returns for a player, before merging

use std::collections::BTreeMap;

use crate::entities::RawModeStats;
use crate::value_objects::{Mode, ShipId};

/// Mode name to raw stats for one ship, as sent by the provider.
pub type RawShipEntry = BTreeMap<String, RawModeStats>;

pub type RawShipStats = BTreeMap<ShipId, RawShipEntry>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStatsPayload {
    pub overall: RawShipStats,
    pub submodes: BTreeMap<Mode, RawShipStats>,
    pub hidden_profile: bool,
}

impl PlayerStatsPayload {
    pub fn hidden() -> Self {
        Self {
            hidden_profile: true,
            ..Self::default()
        }
    }
}
