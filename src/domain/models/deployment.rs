//! Deployment snapshots as observed through the API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a deployment.
///
/// Statuses the API may add later are kept verbatim in [`Other`](Self::Other)
/// so that status diffing keeps working on values this crate does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentStatus {
    Pending,
    Building,
    Success,
    Failed,
    Cancelled,
    /// Any status string not listed above.
    Other(String),
}

impl DeploymentStatus {
    /// Returns the wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Building => "building",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for DeploymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "building" => Self::Building,
            "success" => Self::Success,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for DeploymentStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<DeploymentStatus> for String {
    fn from(status: DeploymentStatus) -> Self {
        match status {
            DeploymentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deployment as returned by `GET /projects/{id}/deployments`.
///
/// Only the fields the trigger reasons about are typed; everything else is
/// kept in `extra` so event payloads carry the full snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub status: DeploymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Remaining fields of the API object, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Deployment {
    /// Minimal deployment, mostly useful for tests and fixtures.
    pub fn new(id: impl Into<String>, status: impl Into<DeploymentStatus>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            project_id: None,
            created_at: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_created_at(mut self, ts: impl Into<String>) -> Self {
        self.created_at = Some(ts.into());
        self
    }

    pub fn with_updated_at(mut self, ts: impl Into<String>) -> Self {
        self.updated_at = Some(ts.into());
        self
    }
}
