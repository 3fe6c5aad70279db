pub mod schedule_service;
pub mod vortex_fetcher;

pub use schedule_service::*;
pub use vortex_fetcher::*;
