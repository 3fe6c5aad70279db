// Player record entity
// One tracked player in one region together with the retained history

use crate::entities::{ActivityMarker, History, ShipSnapshot};
use crate::value_objects::{AccountId, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub account_id: AccountId,
    pub region: Region,
    pub activity: ActivityMarker,
    pub last_update_at: Option<u64>,
    pub history: History,
}

impl PlayerRecord {
    /// A freshly tracked player: requested just now, nothing retained yet.
    pub fn new(account_id: AccountId, region: Region, now: u64) -> Self {
        Self {
            account_id,
            region,
            activity: ActivityMarker::Normal(now),
            last_update_at: None,
            history: History::new(),
        }
    }

    /// The snapshot stored at `timestamp`, else the earliest one stored after it.
    pub fn snapshot_at(&self, timestamp: u64) -> Option<(u64, &ShipSnapshot)> {
        self.history
            .range(timestamp..)
            .next()
            .map(|(date, snapshot)| (*date, snapshot))
    }

    pub fn latest_snapshot(&self) -> Option<(u64, &ShipSnapshot)> {
        self.history
            .last_key_value()
            .map(|(date, snapshot)| (*date, snapshot))
    }

    /// Timestamps strictly earlier than `before`, oldest first.
    pub fn available_dates(&self, before: u64) -> Vec<u64> {
        self.history.range(..before).map(|(date, _)| *date).collect()
    }

    pub fn touch_request(&mut self, premium: bool, now: u64) {
        self.activity = if premium {
            ActivityMarker::Premium
        } else {
            ActivityMarker::Normal(now)
        };
    }
}
