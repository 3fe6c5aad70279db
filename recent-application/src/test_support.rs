use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use recent_domain::ports::{FetchError, PlayerRecordStore, StatsFetcher, StoreError};
use recent_domain::{
    AccountId, PlayerDocument, PlayerRecord, PlayerStatsPayload, RawModeStats, RawShipEntry,
    Region, RuntimeConfig, ShipId,
};

use crate::AppState;

pub const NOW: u64 = 1_700_000_000;

#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<(Region, AccountId), PlayerDocument>>,
    corrupt: Mutex<Vec<(Region, AccountId)>>,
    pub fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn insert(&self, region: Region, account_id: AccountId, document: serde_json::Value) {
        let document = serde_json::from_value(document).expect("document");
        self.documents
            .lock()
            .expect("lock")
            .insert((region, account_id), document);
    }

    pub fn insert_corrupt(&self, region: Region, account_id: AccountId) {
        self.corrupt.lock().expect("lock").push((region, account_id));
    }

    pub fn document(&self, region: Region, account_id: AccountId) -> Option<PlayerDocument> {
        self.documents
            .lock()
            .expect("lock")
            .get(&(region, account_id))
            .cloned()
    }
}

#[async_trait]
impl PlayerRecordStore for MemoryStore {
    async fn list_accounts(&self, region: Region) -> Result<Vec<AccountId>, StoreError> {
        let mut accounts: Vec<AccountId> = self
            .documents
            .lock()
            .expect("lock")
            .keys()
            .filter(|(stored, _)| *stored == region)
            .map(|(_, account)| *account)
            .collect();
        accounts.extend(
            self.corrupt
                .lock()
                .expect("lock")
                .iter()
                .filter(|(stored, _)| *stored == region)
                .map(|(_, account)| *account),
        );
        accounts.sort();
        Ok(accounts)
    }

    async fn load(
        &self,
        region: Region,
        account_id: AccountId,
    ) -> Result<Option<PlayerDocument>, StoreError> {
        if self.corrupt.lock().expect("lock").contains(&(region, account_id)) {
            return Err(StoreError::Corrupt("expected value at line 1".to_string()));
        }
        Ok(self.document(region, account_id))
    }

    async fn save(&self, record: &PlayerRecord) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(anyhow::anyhow!("read-only file system")));
        }
        self.documents
            .lock()
            .expect("lock")
            .insert((record.region, record.account_id), PlayerDocument::from(record));
        Ok(())
    }

    async fn delete(&self, region: Region, account_id: AccountId) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(anyhow::anyhow!("read-only file system")));
        }
        self.documents
            .lock()
            .expect("lock")
            .remove(&(region, account_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<AccountId, Result<PlayerStatsPayload, String>>>,
    pub calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn respond(&self, account_id: AccountId, payload: PlayerStatsPayload) {
        self.responses
            .lock()
            .expect("lock")
            .insert(account_id, Ok(payload));
    }

    pub fn fail(&self, account_id: AccountId, message: &str) {
        self.responses
            .lock()
            .expect("lock")
            .insert(account_id, Err(message.to_string()));
    }
}

#[async_trait]
impl StatsFetcher for ScriptedFetcher {
    async fn fetch_player_stats(
        &self,
        _region: Region,
        account_id: AccountId,
    ) -> Result<PlayerStatsPayload, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().expect("lock").get(&account_id) {
            Some(Ok(payload)) => Ok(payload.clone()),
            Some(Err(message)) => Err(FetchError::Transient(anyhow::anyhow!(message.clone()))),
            None => Err(FetchError::Transient(anyhow::anyhow!("no scripted response"))),
        }
    }
}

pub fn raw_block(battles: u64) -> RawModeStats {
    json!({
        "battles_count": battles,
        "wins": battles / 2,
        "damage_dealt": battles * 30000,
        "frags": 1,
        "planes_killed": 0,
        "original_exp": battles * 900,
        "art_agro": 0,
        "scouting_damage": 0,
        "shots_by_main": 10,
        "hits_by_main": 4
    })
    .as_object()
    .cloned()
    .expect("object")
}

pub fn stored_block(battles: u64) -> serde_json::Value {
    serde_json::Value::Object(raw_block(battles))
}

/// Overall-only payload with one ship in `pvp`.
pub fn payload(ship: u64, battles: u64) -> PlayerStatsPayload {
    let mut entry = RawShipEntry::new();
    entry.insert("pvp".to_string(), raw_block(battles));
    let mut payload = PlayerStatsPayload::default();
    payload.overall.insert(ShipId(ship), entry);
    payload
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig {
        data_dir: "./unused".to_string(),
        regions: Region::ALL.to_vec(),
        ttl_days: 121,
        inactivity_limit_days: 14,
        fetch_timeout_seconds: 5,
        asia_refresh_hour: 21,
        na_refresh_hour: 10,
        eu_refresh_hour: 5,
        compaction_hour: 3,
        compaction_interval_days: 7,
    }
}

pub fn state(store: Arc<MemoryStore>, fetcher: Arc<ScriptedFetcher>) -> AppState {
    AppState::new(config(), store, fetcher)
}
