// Domain entities
pub mod activity;
pub mod document;
pub mod payload;
pub mod player_record;
pub mod runtime_config;
pub mod snapshot;
pub mod stat_block;

pub use activity::*;
pub use document::*;
pub use payload::*;
pub use player_record::*;
pub use runtime_config::*;
pub use snapshot::*;
pub use stat_block::*;
