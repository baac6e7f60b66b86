//! Build and application log operations.

use serde::{Deserialize, Serialize};

use super::plan::{require, PostProcess, RequestPlan};
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum BuildLogOp {
    /// Build logs of one deployment, tagged with the owning project.
    Get {
        project_id: String,
        deployment_id: String,
        #[serde(default)]
        level: Option<String>,
        #[serde(default)]
        cursor: Option<String>,
    },
}

impl BuildLogOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Get { project_id, deployment_id, .. } => {
                require("projectId", project_id)?;
                require("deploymentId", deployment_id)
            }
        }
    }

    pub fn plan(&self) -> RequestPlan {
        match self {
            Self::Get { project_id, deployment_id, level, cursor } => {
                RequestPlan::get(format!("/deployments/{deployment_id}/build_logs"))
                    .with_query("level", level.as_ref())
                    .with_query("cursor", cursor.as_ref())
                    .with_post(PostProcess::AttachProjectId(project_id.clone()))
            }
        }
    }
}

/// Filters shared by both app log operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLogFilter {
    pub project_id: String,
    #[serde(default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl AppLogFilter {
    fn plan(&self) -> RequestPlan {
        RequestPlan::get(format!("/projects/{}/logs", self.project_id))
            .with_query("deployment_id", self.deployment_id.as_ref())
            .with_query("level", self.level.as_ref())
            .with_query("region", self.region.as_ref())
            .with_query("limit", self.limit.filter(|l| *l > 0))
            .with_query("cursor", self.cursor.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum AppLogOp {
    Get {
        #[serde(flatten)]
        filter: AppLogFilter,
    },
    /// Like `get`, bounded in time.
    Query {
        #[serde(flatten)]
        filter: AppLogFilter,
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
}

impl AppLogOp {
    fn filter(&self) -> &AppLogFilter {
        match self {
            Self::Get { filter } | Self::Query { filter, .. } => filter,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require("projectId", &self.filter().project_id)
    }

    pub fn plan(&self) -> RequestPlan {
        match self {
            Self::Get { filter } => filter.plan(),
            Self::Query { filter, since, until } => filter
                .plan()
                .with_query("since", since.as_ref())
                .with_query("until", until.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_log_attaches_project() {
        let op = BuildLogOp::Get {
            project_id: "proj".to_string(),
            deployment_id: "dep".to_string(),
            level: None,
            cursor: Some("c1".to_string()),
        };
        let plan = op.plan();
        assert_eq!(plan.path, "/deployments/dep/build_logs");
        assert_eq!(plan.query["cursor"], "c1");
        assert_eq!(plan.post, PostProcess::AttachProjectId("proj".to_string()));
    }

    #[test]
    fn test_app_log_query_from_json() {
        let op: AppLogOp = serde_json::from_value(json!({
            "operation": "query",
            "projectId": "proj",
            "deploymentId": "dep",
            "level": "error",
            "since": "2024-01-01T00:00:00Z",
        }))
        .unwrap();
        let plan = op.plan();
        assert_eq!(plan.path, "/projects/proj/logs");
        assert_eq!(plan.query["deployment_id"], "dep");
        assert_eq!(plan.query["level"], "error");
        assert_eq!(plan.query["since"], "2024-01-01T00:00:00Z");
        assert!(!plan.query.contains_key("until"));
    }

    #[test]
    fn test_app_log_get_ignores_missing_deployment() {
        let op = AppLogOp::Get {
            filter: AppLogFilter {
                project_id: "proj".to_string(),
                ..AppLogFilter::default()
            },
        };
        assert!(op.validate().is_ok());
        assert!(op.plan().query.is_empty());
    }
}
