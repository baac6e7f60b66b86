//! Durable trigger state port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::poll_state::PollState;

/// Port for persisting [`PollState`] between poll cycles.
///
/// State is keyed per trigger instance. Callers guarantee at most one cycle
/// per key runs at a time.
#[async_trait]
pub trait PollStateStore: Send + Sync {
    /// Load the state for `key`; a key never saved yields an empty state.
    async fn load(&self, key: &str) -> DomainResult<PollState>;

    /// Replace the state stored for `key`.
    async fn save(&self, key: &str, state: &PollState) -> DomainResult<()>;
}
