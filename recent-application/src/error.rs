use thiserror::Error;

use recent_domain::{DomainError, FetchError, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

/// Why a single player could not be processed this cycle.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("transient fetch failure: {0}")]
    TransientFetch(#[source] anyhow::Error),
    #[error("malformed stats: {0}")]
    MalformedStats(String),
    #[error("schema violation: {0}")]
    SchemaViolation(String),
    #[error("persistence failure: {0}")]
    Persistence(#[source] StoreError),
}

impl RefreshError {
    /// Only a failing store stops a batch; every other error skips one player.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RefreshError::Persistence(_))
    }
}

impl From<FetchError> for RefreshError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transient(source) => RefreshError::TransientFetch(source),
            FetchError::Malformed(message) => RefreshError::MalformedStats(message),
        }
    }
}

impl From<DomainError> for RefreshError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MalformedStats { .. } => RefreshError::MalformedStats(err.to_string()),
            DomainError::SchemaViolation(message) => RefreshError::SchemaViolation(message),
        }
    }
}

impl From<StoreError> for RefreshError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupt(message) => RefreshError::SchemaViolation(message),
            unavailable @ StoreError::Unavailable(_) => RefreshError::Persistence(unavailable),
        }
    }
}
