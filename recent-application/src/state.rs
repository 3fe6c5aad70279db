use std::sync::Arc;

use recent_domain::ports::{PlayerRecordStore, StatsFetcher};
use recent_domain::{RetentionPolicy, RuntimeConfig};

use crate::ops::RegionLocks;
use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub policy: RetentionPolicy,
    pub store: Arc<dyn PlayerRecordStore>,
    pub fetcher: Arc<dyn StatsFetcher>,
    pub metrics: Arc<Metrics>,
    pub region_locks: Arc<RegionLocks>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        store: Arc<dyn PlayerRecordStore>,
        fetcher: Arc<dyn StatsFetcher>,
    ) -> Self {
        Self {
            policy: RetentionPolicy::from(&config),
            config,
            store,
            fetcher,
            metrics: Arc::new(Metrics::default()),
            region_locks: Arc::new(RegionLocks::new()),
        }
    }
}
