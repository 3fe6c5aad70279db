// Stored document entity
// On-disk shape of a player record, possibly still in a legacy format

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{ActivityMarker, PlayerRecord, RawShipEntry};

/// Ship id (as a string key) to its raw mode stats.
pub type RawSnapshot = BTreeMap<String, RawShipEntry>;

/// Every marker encoding ever written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredActivityMarker {
    Canonical(ActivityMarker),
    Timestamp(u64),
    Tag(String),
}

pub const LEGACY_PREMIUM_TAG: &str = "prime";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDocument {
    pub last_request: StoredActivityMarker,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_at: Option<u64>,
    #[serde(default)]
    pub data: BTreeMap<String, RawSnapshot>,
}

impl From<&PlayerRecord> for PlayerDocument {
    fn from(record: &PlayerRecord) -> Self {
        let data = record
            .history
            .iter()
            .map(|(timestamp, snapshot)| {
                let ships = snapshot
                    .ships()
                    .map(|(ship_id, modes)| {
                        let entry = modes
                            .iter()
                            .map(|(mode, block)| (mode.as_str().to_string(), block.to_raw()))
                            .collect::<RawShipEntry>();
                        (ship_id.to_string(), entry)
                    })
                    .collect::<RawSnapshot>();
                (timestamp.to_string(), ships)
            })
            .collect();

        Self {
            last_request: StoredActivityMarker::Canonical(record.activity),
            last_update_at: record.last_update_at,
            data,
        }
    }
}
