// Snapshot entity
// Complete per-ship, per-mode statistics of one player at one point in time

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::StatBlock;
use crate::value_objects::{Mode, ShipId};

pub type ModeStats = BTreeMap<Mode, StatBlock>;

/// Retained snapshots keyed by ingestion time (unix seconds).
pub type History = BTreeMap<u64, ShipSnapshot>;

/// Ordered maps keep equality and hashing structural, independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipSnapshot(BTreeMap<ShipId, ModeStats>);

impl ShipSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ship; an empty mode set is ignored so no ship entry is ever empty.
    pub fn insert_ship(&mut self, ship_id: ShipId, modes: ModeStats) {
        if !modes.is_empty() {
            self.0.insert(ship_id, modes);
        }
    }

    pub fn ship(&self, ship_id: ShipId) -> Option<&ModeStats> {
        self.0.get(&ship_id)
    }

    pub fn ships(&self) -> impl Iterator<Item = (&ShipId, &ModeStats)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(ShipId, ModeStats)> for ShipSnapshot {
    fn from_iter<T: IntoIterator<Item = (ShipId, ModeStats)>>(iter: T) -> Self {
        let mut snapshot = ShipSnapshot::new();
        for (ship_id, modes) in iter {
            snapshot.insert_ship(ship_id, modes);
        }
        snapshot
    }
}
