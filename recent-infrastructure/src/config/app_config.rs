use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use recent_domain::{Region, RuntimeConfig, INACTIVITY_LIMIT_DAYS, TTL_DAYS};

use crate::config::validation::{validate_hour, validate_positive};

pub const DEFAULT_VORTEX_URL: &str = "https://vortex.worldofwarships.{tld}";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: String,
    pub log_dir: Option<String>,
    pub regions: Vec<Region>,
    pub vortex_url: String,
    pub fetch_timeout_seconds: u64,
    pub ttl_days: u64,
    pub inactivity_limit_days: u64,
    pub asia_refresh_hour: u32,
    pub na_refresh_hour: u32,
    pub eu_refresh_hour: u32,
    pub compaction_hour: u32,
    pub compaction_interval_days: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "./recent_DB".to_string(),
            log_dir: None,
            regions: Region::ALL.to_vec(),
            vortex_url: DEFAULT_VORTEX_URL.to_string(),
            fetch_timeout_seconds: 30,
            ttl_days: TTL_DAYS,
            inactivity_limit_days: INACTIVITY_LIMIT_DAYS,
            asia_refresh_hour: 21,
            na_refresh_hour: 10,
            eu_refresh_hour: 5,
            compaction_hour: 3,
            compaction_interval_days: 7,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("RECENT_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides(|key| env::var(key).ok());
        config.resolve_paths(file_path.parent());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.vortex_url = self.vortex_url.trim().trim_end_matches('/').to_string();
        self.regions.sort();
        self.regions.dedup();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.regions.is_empty() {
            return Err(anyhow!("at least one region must be configured"));
        }
        if !self.vortex_url.starts_with("http://") && !self.vortex_url.starts_with("https://") {
            return Err(anyhow!("vortex_url must be an http(s) url"));
        }
        validate_positive("fetch_timeout_seconds", self.fetch_timeout_seconds)?;
        validate_positive("ttl_days", self.ttl_days)?;
        validate_positive("inactivity_limit_days", self.inactivity_limit_days)?;
        validate_positive("compaction_interval_days", self.compaction_interval_days)?;
        validate_hour("asia_refresh_hour", self.asia_refresh_hour)?;
        validate_hour("na_refresh_hour", self.na_refresh_hour)?;
        validate_hour("eu_refresh_hour", self.eu_refresh_hour)?;
        validate_hour("compaction_hour", self.compaction_hour)?;
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            data_dir: self.data_dir.clone(),
            regions: self.regions.clone(),
            ttl_days: self.ttl_days,
            inactivity_limit_days: self.inactivity_limit_days,
            fetch_timeout_seconds: self.fetch_timeout_seconds,
            asia_refresh_hour: self.asia_refresh_hour,
            na_refresh_hour: self.na_refresh_hour,
            eu_refresh_hour: self.eu_refresh_hour,
            compaction_hour: self.compaction_hour,
            compaction_interval_days: self.compaction_interval_days,
        }
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("RECENT_DATA_DIR") {
            self.data_dir = value;
        }
        if let Some(value) = lookup("RECENT_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Some(value) = lookup("RECENT_REGIONS") {
            match parse_env_regions(&value) {
                Ok(regions) => self.regions = regions,
                Err(err) => warn!("ignoring RECENT_REGIONS: {}", err),
            }
        }
        if let Some(value) = lookup("RECENT_VORTEX_URL") {
            self.vortex_url = value;
        }
        if let Some(value) = lookup("RECENT_FETCH_TIMEOUT_SECONDS") {
            self.fetch_timeout_seconds = value.parse().unwrap_or(self.fetch_timeout_seconds);
        }
        if let Some(value) = lookup("RECENT_TTL_DAYS") {
            self.ttl_days = value.parse().unwrap_or(self.ttl_days);
        }
        if let Some(value) = lookup("RECENT_INACTIVITY_LIMIT_DAYS") {
            self.inactivity_limit_days = value.parse().unwrap_or(self.inactivity_limit_days);
        }
        if let Some(value) = lookup("RECENT_ASIA_REFRESH_HOUR") {
            self.asia_refresh_hour = value.parse().unwrap_or(self.asia_refresh_hour);
        }
        if let Some(value) = lookup("RECENT_NA_REFRESH_HOUR") {
            self.na_refresh_hour = value.parse().unwrap_or(self.na_refresh_hour);
        }
        if let Some(value) = lookup("RECENT_EU_REFRESH_HOUR") {
            self.eu_refresh_hour = value.parse().unwrap_or(self.eu_refresh_hour);
        }
        if let Some(value) = lookup("RECENT_COMPACTION_HOUR") {
            self.compaction_hour = value.parse().unwrap_or(self.compaction_hour);
        }
        if let Some(value) = lookup("RECENT_COMPACTION_INTERVAL_DAYS") {
            self.compaction_interval_days =
                value.parse().unwrap_or(self.compaction_interval_days);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

fn parse_env_regions(value: &str) -> Result<Vec<Region>, String> {
    value
        .split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect()
}
