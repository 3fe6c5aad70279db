// Stat block entity
// One ship's battle statistics in one mode

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Per-mode statistics exactly as the provider (or an old record) delivered them.
pub type RawModeStats = Map<String, Value>;

pub const BATTLES_FIELD: &str = "battles_count";
pub const LEGACY_BATTLES_FIELD: &str = "battles";

pub const CANONICAL_FIELDS: [&str; 10] = [
    "battles_count",
    "wins",
    "damage_dealt",
    "frags",
    "planes_killed",
    "original_exp",
    "art_agro",
    "scouting_damage",
    "shots_by_main",
    "hits_by_main",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBlock {
    pub battles_count: u64,
    pub wins: u64,
    pub damage_dealt: u64,
    pub frags: u64,
    pub planes_killed: u64,
    pub original_exp: Number,
    pub art_agro: u64,
    pub scouting_damage: u64,
    pub shots_by_main: u64,
    pub hits_by_main: u64,
}

impl StatBlock {
    pub fn to_raw(&self) -> RawModeStats {
        let mut raw = Map::new();
        raw.insert("battles_count".into(), self.battles_count.into());
        raw.insert("wins".into(), self.wins.into());
        raw.insert("damage_dealt".into(), self.damage_dealt.into());
        raw.insert("frags".into(), self.frags.into());
        raw.insert("planes_killed".into(), self.planes_killed.into());
        raw.insert("original_exp".into(), Value::Number(self.original_exp.clone()));
        raw.insert("art_agro".into(), self.art_agro.into());
        raw.insert("scouting_damage".into(), self.scouting_damage.into());
        raw.insert("shots_by_main".into(), self.shots_by_main.into());
        raw.insert("hits_by_main".into(), self.hits_by_main.into());
        raw
    }
}
