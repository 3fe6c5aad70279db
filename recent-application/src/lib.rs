// Recent Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod ops;
pub mod queries;
pub mod state;

#[cfg(test)]
mod test_support;

pub use error::{AppError, RefreshError};
pub use metrics::{Metrics, MetricsSnapshot};
pub use state::AppState;
