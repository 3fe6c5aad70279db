use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures_util::future::try_join_all;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use recent_domain::{
    AccountId, FetchError, Mode, PlayerStatsPayload, RawShipEntry, RawShipStats, Region, ShipId,
    StatsFetcher,
};

/// Per-ship statistics from the regional vortex API, one request per mode.
pub struct VortexStatsFetcher {
    client: Client,
    base_url: String,
}

impl VortexStatsFetcher {
    /// `base_url` may contain `{tld}`, replaced by the region's top level domain.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            // region passes run on short-lived runtimes; pooled connections would outlive them
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn ships_url(&self, region: Region, account_id: AccountId, mode: Mode) -> String {
        format!(
            "{}/api/accounts/{}/ships/{}",
            self.base_url.replace("{tld}", region.vortex_tld()),
            account_id,
            mode
        )
    }

    /// `Ok(None)` when the profile is hidden.
    async fn fetch_mode(
        &self,
        region: Region,
        account_id: AccountId,
        mode: Mode,
    ) -> Result<Option<RawShipStats>, FetchError> {
        let url = self.ships_url(region, account_id, mode);
        debug!(%url, "fetching ship statistics");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| FetchError::Transient(err.into()))?;
        let body: Value = response.json().await.map_err(|err| {
            if err.is_decode() {
                FetchError::Malformed(format!("{}: {}", mode, err))
            } else {
                FetchError::Transient(err.into())
            }
        })?;
        parse_ship_stats(&body, account_id)
    }
}

#[async_trait]
impl StatsFetcher for VortexStatsFetcher {
    async fn fetch_player_stats(
        &self,
        region: Region,
        account_id: AccountId,
    ) -> Result<PlayerStatsPayload, FetchError> {
        let overall = self.fetch_mode(region, account_id, Mode::Pvp);
        let submodes = try_join_all(Mode::SUBMODES.into_iter().map(|mode| async move {
            self.fetch_mode(region, account_id, mode)
                .await
                .map(|stats| (mode, stats))
        }));
        let (overall, submodes) = tokio::try_join!(overall, submodes)?;

        let Some(overall) = overall else {
            return Ok(PlayerStatsPayload::hidden());
        };
        let submodes = submodes
            .into_iter()
            .filter_map(|(mode, stats)| stats.map(|stats| (mode, stats)))
            .collect();

        Ok(PlayerStatsPayload {
            overall,
            submodes,
            hidden_profile: false,
        })
    }
}

/// `hidden_profile` may sit on `data` itself or on the account entry.
pub fn is_hidden(body: &Value, account_id: AccountId) -> bool {
    let data = &body["data"];
    data["hidden_profile"] == Value::Bool(true)
        || data[account_id.to_string()]["hidden_profile"] == Value::Bool(true)
}

/// The `statistics` map of one mode response, or `None` for a hidden profile.
pub fn parse_ship_stats(
    body: &Value,
    account_id: AccountId,
) -> Result<Option<RawShipStats>, FetchError> {
    if let Some(status) = body.get("status").and_then(Value::as_str) {
        if status != "ok" {
            return Err(FetchError::Malformed(format!("provider status {}", status)));
        }
    }
    if is_hidden(body, account_id) {
        return Ok(None);
    }

    let statistics = body
        .get("data")
        .and_then(|data| data.get(account_id.to_string()))
        .ok_or_else(|| FetchError::Malformed(format!("no entry for account {}", account_id)))?
        .get("statistics")
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::Malformed("statistics is not an object".to_string()))?;

    let mut ships = BTreeMap::new();
    for (key, entry) in statistics {
        let ship_id = key
            .parse()
            .map(ShipId)
            .map_err(|_| FetchError::Malformed(format!("ship id {:?}", key)))?;
        ships.insert(ship_id, parse_ship_entry(entry));
    }
    Ok(Some(ships))
}

fn parse_ship_entry(entry: &Value) -> RawShipEntry {
    let Some(modes) = entry.as_object() else {
        return RawShipEntry::new();
    };
    modes
        .iter()
        .filter_map(|(name, stats)| {
            stats
                .as_object()
                .map(|stats: &Map<String, Value>| (name.clone(), stats.clone()))
        })
        .collect()
}
