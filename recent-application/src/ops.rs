pub mod region_locks;

pub use region_locks::*;
