// Domain services
// Pure functions over snapshots and records; no I/O

pub mod merger;
pub mod migrator;
pub mod normalizer;
pub mod retention;

pub use merger::*;
pub use migrator::*;
pub use normalizer::*;
pub use retention::*;
