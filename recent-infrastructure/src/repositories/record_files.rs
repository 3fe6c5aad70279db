use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use recent_domain::{AccountId, PlayerDocument, PlayerRecord, PlayerRecordStore, Region, StoreError};

use crate::utils::parse_record_file_name;

/// One JSON document per player under `<data_dir>/players/<region>/<account_id>.json`.
pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root: data_dir.as_ref().join("players"),
        }
    }

    fn region_dir(&self, region: Region) -> PathBuf {
        self.root.join(region.as_str())
    }

    fn record_path(&self, region: Region, account_id: AccountId) -> PathBuf {
        self.region_dir(region).join(format!("{}.json", account_id))
    }
}

fn unavailable(err: impl Into<anyhow::Error>) -> StoreError {
    StoreError::Unavailable(err.into())
}

#[async_trait]
impl PlayerRecordStore for FileRecordStore {
    async fn list_accounts(&self, region: Region) -> Result<Vec<AccountId>, StoreError> {
        let mut entries = match fs::read_dir(self.region_dir(region)).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(unavailable(err)),
        };
        let mut accounts = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            if let Some(account_id) = parse_record_file_name(&entry.path()) {
                accounts.push(account_id);
            }
        }
        accounts.sort();
        Ok(accounts)
    }

    async fn load(
        &self,
        region: Region,
        account_id: AccountId,
    ) -> Result<Option<PlayerDocument>, StoreError> {
        let path = self.record_path(region, account_id);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(unavailable(err)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|err| StoreError::Corrupt(format!("{}: {}", path.display(), err)))
    }

    async fn save(&self, record: &PlayerRecord) -> Result<(), StoreError> {
        let dir = self.region_dir(record.region);
        fs::create_dir_all(&dir).await.map_err(unavailable)?;

        let document = PlayerDocument::from(record);
        let content = serde_json::to_vec(&document).map_err(unavailable)?;
        let path = self.record_path(record.region, record.account_id);
        let temp = dir.join(format!("{}.json.tmp", record.account_id));
        fs::write(&temp, content).await.map_err(unavailable)?;
        fs::rename(&temp, &path).await.map_err(unavailable)?;
        debug!(path = %path.display(), "record saved");
        Ok(())
    }

    async fn delete(&self, region: Region, account_id: AccountId) -> Result<(), StoreError> {
        match fs::remove_file(self.record_path(region, account_id)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(unavailable(err)),
        }
    }
}
