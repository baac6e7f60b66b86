//! Deployment lifecycle events emitted by the polling trigger.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::deployment::{Deployment, DeploymentStatus};

/// Which events a trigger instance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventFilter {
    /// A deployment id appeared that was not seen before.
    #[default]
    #[serde(rename = "deployment.created")]
    Created,
    /// A deployment transitioned to `failed`.
    #[serde(rename = "deployment.failed")]
    Failed,
    /// A deployment transitioned to `success`.
    #[serde(rename = "deployment.success")]
    Success,
    /// Creations and every status change.
    #[serde(rename = "deployment.any")]
    Any,
}

impl EventFilter {
    /// Returns the string representation of this filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "deployment.created",
            Self::Failed => "deployment.failed",
            Self::Success => "deployment.success",
            Self::Any => "deployment.any",
        }
    }

    /// Parse a filter from either its full or short form
    /// (`deployment.success` or `success`).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let short = s.strip_prefix("deployment.").unwrap_or(s);
        match short.to_lowercase().as_str() {
            "created" => Some(Self::Created),
            "failed" => Some(Self::Failed),
            "success" => Some(Self::Success),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Whether a newly seen deployment should be reported.
    pub fn accepts_created(&self) -> bool {
        matches!(self, Self::Created | Self::Any)
    }

    /// Whether a transition into `status` should be reported.
    pub fn accepts_transition(&self, status: &DeploymentStatus) -> bool {
        match self {
            Self::Any => true,
            Self::Success => *status == DeploymentStatus::Success,
            Self::Failed => *status == DeploymentStatus::Failed,
            Self::Created => false,
        }
    }
}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lifecycle event, shaped like the item the trigger hands downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEvent {
    /// `deployment.created` or `deployment.<new status>`.
    pub event: String,
    pub deployment: Deployment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<DeploymentStatus>,
    pub organization_id: String,
    pub project_id: String,
    /// RFC 3339 time the event refers to.
    pub timestamp: String,
}

impl DeploymentEvent {
    /// Event name for a deployment seen for the first time.
    pub const CREATED: &'static str = "deployment.created";

    /// Event name for a transition into `status`.
    pub fn transition_name(status: &DeploymentStatus) -> String {
        format!("deployment.{status}")
    }

    /// Whether this event reports a newly seen deployment.
    pub fn is_created(&self) -> bool {
        self.event == Self::CREATED
    }
}
