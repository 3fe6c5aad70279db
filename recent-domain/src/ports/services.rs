use async_trait::async_trait;
use thiserror::Error;

use crate::entities::PlayerStatsPayload;
use crate::value_objects::{AccountId, Region};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or provider failure; worth retrying next cycle.
    #[error("transient fetch failure: {0}")]
    Transient(#[source] anyhow::Error),
    /// The provider answered with a shape we do not understand.
    #[error("malformed provider payload: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait StatsFetcher: Send + Sync {
    /// Overall and submode statistics of every ship, or a payload flagged `hidden_profile`.
    async fn fetch_player_stats(
        &self,
        region: Region,
        account_id: AccountId,
    ) -> Result<PlayerStatsPayload, FetchError>;
}
