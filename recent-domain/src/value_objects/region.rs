// Game region value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Asia,
    Na,
    Eu,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Asia, Region::Na, Region::Eu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "asia",
            Region::Na => "na",
            Region::Eu => "eu",
        }
    }

    /// Top level domain of the region's vortex host.
    pub fn vortex_tld(&self) -> &'static str {
        match self {
            Region::Asia => "asia",
            Region::Na => "com",
            Region::Eu => "eu",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asia" | "sea" => Ok(Region::Asia),
            "na" => Ok(Region::Na),
            "eu" => Ok(Region::Eu),
            other => Err(format!("unknown region: {other}")),
        }
    }
}
