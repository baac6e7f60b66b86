use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::DomainResult;
use crate::domain::models::poll_state::PollState;
use crate::domain::ports::poll_state_store::PollStateStore;

/// Poll state kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPollStateStore {
    states: Mutex<HashMap<String, PollState>>,
}

impl InMemoryPollStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStateStore for InMemoryPollStateStore {
    async fn load(&self, key: &str) -> DomainResult<PollState> {
        Ok(self.states.lock().await.get(key).cloned().unwrap_or_default())
    }

    async fn save(&self, key: &str, state: &PollState) -> DomainResult<()> {
        self.states
            .lock()
            .await
            .insert(key.to_string(), state.clone());
        Ok(())
    }
}
