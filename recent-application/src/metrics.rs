use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct Metrics {
    players_refreshed: AtomicU64,
    snapshots_inserted: AtomicU64,
    records_deleted: AtomicU64,
    players_skipped: AtomicU64,
    entries_compacted: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub players_refreshed: u64,
    pub snapshots_inserted: u64,
    pub records_deleted: u64,
    pub players_skipped: u64,
    pub entries_compacted: u64,
}

impl Metrics {
    pub fn record_refresh(&self, inserted: bool) {
        self.players_refreshed.fetch_add(1, Ordering::Relaxed);
        if inserted {
            self.snapshots_inserted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_deleted(&self) {
        self.records_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.players_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_compacted(&self, entries: usize) {
        self.entries_compacted
            .fetch_add(entries as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            players_refreshed: self.players_refreshed.load(Ordering::Relaxed),
            snapshots_inserted: self.snapshots_inserted.load(Ordering::Relaxed),
            records_deleted: self.records_deleted.load(Ordering::Relaxed),
            players_skipped: self.players_skipped.load(Ordering::Relaxed),
            entries_compacted: self.entries_compacted.load(Ordering::Relaxed),
        }
    }
}
