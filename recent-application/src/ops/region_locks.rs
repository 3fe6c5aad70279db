use tokio::sync::{Mutex, MutexGuard};

use recent_domain::Region;

/// One async lock per region; refresh and compaction passes of a region never overlap.
#[derive(Debug, Default)]
pub struct RegionLocks {
    asia: Mutex<()>,
    na: Mutex<()>,
    eu: Mutex<()>,
}

impl RegionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, region: Region) -> MutexGuard<'_, ()> {
        let lock = match region {
            Region::Asia => &self.asia,
            Region::Na => &self.na,
            Region::Eu => &self.eu,
        };
        lock.lock().await
    }
}
