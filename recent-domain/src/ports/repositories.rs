use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{PlayerDocument, PlayerRecord};
use crate::value_objects::{AccountId, Region};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("record store unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
    /// A stored record exists but is not valid JSON of any known layout.
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}

/// Persistence of one document per (region, account).
#[async_trait]
pub trait PlayerRecordStore: Send + Sync {
    async fn list_accounts(&self, region: Region) -> Result<Vec<AccountId>, StoreError>;
    /// `Ok(None)` when the player is not tracked in this region.
    async fn load(
        &self,
        region: Region,
        account_id: AccountId,
    ) -> Result<Option<PlayerDocument>, StoreError>;
    /// Replaces the stored record as a whole; readers never observe a partial write.
    async fn save(&self, record: &PlayerRecord) -> Result<(), StoreError>;
    /// Removing a record that does not exist succeeds.
    async fn delete(&self, region: Region, account_id: AccountId) -> Result<(), StoreError>;
}
