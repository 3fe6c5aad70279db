use crate::value_objects::Region;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub data_dir: String,
    pub regions: Vec<Region>,
    pub ttl_days: u64,
    pub inactivity_limit_days: u64,
    pub fetch_timeout_seconds: u64,
    pub asia_refresh_hour: u32,
    pub na_refresh_hour: u32,
    pub eu_refresh_hour: u32,
    pub compaction_hour: u32,
    pub compaction_interval_days: u64,
}

impl RuntimeConfig {
    /// UTC hour of the region's daily refresh.
    pub fn refresh_hour(&self, region: Region) -> u32 {
        match region {
            Region::Asia => self.asia_refresh_hour,
            Region::Na => self.na_refresh_hour,
            Region::Eu => self.eu_refresh_hour,
        }
    }
}
