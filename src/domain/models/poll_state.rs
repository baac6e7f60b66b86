//! Trigger state persisted between poll cycles.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::deployment::DeploymentStatus;

/// What the trigger remembers about the previous cycle.
///
/// Serialized with the same keys the host's workflow storage uses, so state
/// written by one host can be read by another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollState {
    /// Newest deployment id seen by the last successful cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_deployment_id: Option<String>,
    /// Last observed status per deployment id within the watched window.
    #[serde(default)]
    pub last_deployment_statuses: HashMap<String, DeploymentStatus>,
}

impl PollState {
    /// Fresh state for a trigger that has never polled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no cycle has completed yet; such a cycle only seeds state.
    pub fn is_first_poll(&self) -> bool {
        self.last_deployment_id.is_none()
    }

    /// Last observed status of a deployment.
    pub fn status_of(&self, deployment_id: &str) -> Option<&DeploymentStatus> {
        self.last_deployment_statuses.get(deployment_id)
    }
}
