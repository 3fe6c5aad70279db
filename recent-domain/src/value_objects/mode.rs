// Battle mode value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Pvp,
    PvpSolo,
    PvpDiv2,
    PvpDiv3,
    RankSolo,
}

impl Mode {
    /// Every mode a ship entry may carry.
    pub const ALL: [Mode; 5] = [
        Mode::Pvp,
        Mode::PvpSolo,
        Mode::PvpDiv2,
        Mode::PvpDiv3,
        Mode::RankSolo,
    ];

    /// Modes fetched in addition to the overall `pvp` response.
    pub const SUBMODES: [Mode; 4] = [Mode::PvpSolo, Mode::PvpDiv2, Mode::PvpDiv3, Mode::RankSolo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Pvp => "pvp",
            Mode::PvpSolo => "pvp_solo",
            Mode::PvpDiv2 => "pvp_div2",
            Mode::PvpDiv3 => "pvp_div3",
            Mode::RankSolo => "rank_solo",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
