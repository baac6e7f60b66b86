//! Usage analytics at organization, project and deployment level.

use serde::{Deserialize, Serialize};

use super::plan::{check_date, require, with_time_range, RequestPlan};
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum AnalyticsOp {
    GetOrganization {
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
    GetProject {
        project_id: String,
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
    GetDeployment {
        deployment_id: String,
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
}

impl AnalyticsOp {
    fn range(&self) -> (Option<&str>, Option<&str>) {
        match self {
            Self::GetOrganization { since, until }
            | Self::GetProject { since, until, .. }
            | Self::GetDeployment { since, until, .. } => (since.as_deref(), until.as_deref()),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::GetOrganization { .. } => {}
            Self::GetProject { project_id, .. } => require("projectId", project_id)?,
            Self::GetDeployment { deployment_id, .. } => require("deploymentId", deployment_id)?,
        }
        let (since, until) = self.range();
        check_date("since", since)?;
        check_date("until", until)
    }

    pub fn plan(&self, org_id: &str) -> DomainResult<RequestPlan> {
        let path = match self {
            Self::GetOrganization { .. } => format!("/organizations/{org_id}/analytics"),
            Self::GetProject { project_id, .. } => format!("/projects/{project_id}/analytics"),
            Self::GetDeployment { deployment_id, .. } => {
                format!("/deployments/{deployment_id}/analytics")
            }
        };
        let (since, until) = self.range();
        with_time_range(RequestPlan::get(path), since, until)
    }
}
