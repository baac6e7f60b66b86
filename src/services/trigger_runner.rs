//! Stateful driver around [`DeploymentTrigger`].
//!
//! Loads the trigger's [`PollState`] from a [`PollStateStore`], runs one
//! cycle and saves the result. `watch` repeats that on a fixed interval
//! until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use super::trigger::DeploymentTrigger;
use crate::domain::models::event::DeploymentEvent;
use crate::domain::models::poll_state::PollState;
use crate::domain::ports::poll_state_store::PollStateStore;

/// Runs poll cycles for one trigger key.
pub struct TriggerRunner {
    trigger: DeploymentTrigger,
    store: Arc<dyn PollStateStore>,
    key: String,
}

impl TriggerRunner {
    pub fn new(trigger: DeploymentTrigger, store: Arc<dyn PollStateStore>) -> Self {
        let key = trigger.key();
        Self { trigger, store, key }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn trigger(&self) -> &DeploymentTrigger {
        &self.trigger
    }

    /// One load → poll → save cycle.
    ///
    /// A store failure is logged and reported as "nothing new". Events are
    /// only returned once the state that produced them has been saved.
    pub async fn run_once(&self) -> Option<Vec<DeploymentEvent>> {
        let mut state = match self.store.load(&self.key).await {
            Ok(state) => state,
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to load poll state");
                return None;
            }
        };

        let before: PollState = state.clone();
        let events = self.trigger.poll(&mut state).await;

        if state != before {
            if let Err(e) = self.store.save(&self.key, &state).await {
                error!(key = %self.key, error = %e, "Failed to save poll state");
                return None;
            }
        }
        events
    }

    /// Poll every `interval` until Ctrl-C, handing each batch of events to
    /// `on_events`.
    pub async fn watch<F>(&self, interval: Duration, mut on_events: F) -> anyhow::Result<()>
    where
        F: FnMut(&[DeploymentEvent]),
    {
        info!(
            key = %self.key,
            interval_secs = interval.as_secs(),
            "Watching deployments"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(events) = self.run_once().await {
                        on_events(&events);
                    }
                }
                result = tokio::signal::ctrl_c() => {
                    result?;
                    info!(key = %self.key, "Stopped watching deployments");
                    return Ok(());
                }
            }
        }
    }
}
