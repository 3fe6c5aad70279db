pub mod snapshot_queries;

pub use snapshot_queries::*;
