// Activity marker entity

use serde::{Deserialize, Serialize};

/// Premium players never go stale; normal players carry the time of their last request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityMarker {
    Premium,
    Normal(u64),
}
