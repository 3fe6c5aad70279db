pub mod compaction_commands;
pub mod refresh_commands;
pub mod track_commands;

pub use compaction_commands::*;
pub use refresh_commands::*;
pub use track_commands::*;
