//! Typed resource operations.
//!
//! An [`Operation`] is what one input item asks the adapter to do. It is
//! deserialized from JSON shaped like
//! `{"resource": "project", "operation": "get", "projectId": "..."}`, so an
//! unknown resource or operation is rejected at the boundary. Each operation
//! validates its own parameters and resolves to a [`RequestPlan`] without
//! touching the network.

mod analytics;
mod certificate;
mod custom_domain;
mod deployment;
mod environment_variable;
mod kv_database;
mod logs;
mod organization;
mod plan;
mod playground;
mod project;
mod region;

use serde::{Deserialize, Serialize};

pub use analytics::AnalyticsOp;
pub use certificate::CertificateOp;
pub use custom_domain::DomainOp;
pub use deployment::{CompilerOptions, DeploymentOp, DeploymentSource, INLINE_ENTRY_POINT};
pub use environment_variable::EnvironmentVariableOp;
pub use kv_database::KvDatabaseOp;
pub use logs::{AppLogFilter, AppLogOp, BuildLogOp};
pub use organization::OrganizationOp;
pub use plan::{FetchMode, HttpMethod, PostProcess, Query, RequestPlan, DEFAULT_LIST_LIMIT};
pub use playground::PlaygroundOp;
pub use project::ProjectOp;
pub use region::RegionOp;

use crate::domain::errors::DomainResult;

/// One `(resource, operation)` pair with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "camelCase")]
pub enum Operation {
    Organization(OrganizationOp),
    Project(ProjectOp),
    Deployment(DeploymentOp),
    Domain(DomainOp),
    KvDatabase(KvDatabaseOp),
    BuildLog(BuildLogOp),
    AppLog(AppLogOp),
    EnvironmentVariable(EnvironmentVariableOp),
    Analytics(AnalyticsOp),
    Certificate(CertificateOp),
    Region(RegionOp),
    Playground(PlaygroundOp),
}

impl Operation {
    /// Resource name as it appears in JSON.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Organization(_) => "organization",
            Self::Project(_) => "project",
            Self::Deployment(_) => "deployment",
            Self::Domain(_) => "domain",
            Self::KvDatabase(_) => "kvDatabase",
            Self::BuildLog(_) => "buildLog",
            Self::AppLog(_) => "appLog",
            Self::EnvironmentVariable(_) => "environmentVariable",
            Self::Analytics(_) => "analytics",
            Self::Certificate(_) => "certificate",
            Self::Region(_) => "region",
            Self::Playground(_) => "playground",
        }
    }

    /// Check parameters without any I/O.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Organization(op) => op.validate(),
            Self::Project(op) => op.validate(),
            Self::Deployment(op) => op.validate(),
            Self::Domain(op) => op.validate(),
            Self::KvDatabase(op) => op.validate(),
            Self::BuildLog(op) => op.validate(),
            Self::AppLog(op) => op.validate(),
            Self::EnvironmentVariable(op) => op.validate(),
            Self::Analytics(op) => op.validate(),
            Self::Certificate(op) => op.validate(),
            Self::Region(_) => Ok(()),
            Self::Playground(op) => op.validate(),
        }
    }

    /// Validate, then resolve the request for the given organization.
    pub fn plan(&self, organization_id: &str) -> DomainResult<RequestPlan> {
        self.validate()?;
        let org = organization_id;
        Ok(match self {
            Self::Organization(op) => op.plan(org)?,
            Self::Project(op) => op.plan(org)?,
            Self::Deployment(op) => op.plan()?,
            Self::Domain(op) => op.plan(),
            Self::KvDatabase(op) => op.plan(org),
            Self::BuildLog(op) => op.plan(),
            Self::AppLog(op) => op.plan(),
            Self::EnvironmentVariable(op) => op.plan(),
            Self::Analytics(op) => op.plan(org)?,
            Self::Certificate(op) => op.plan(),
            Self::Region(op) => op.plan(),
            Self::Playground(op) => op.plan(org),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DenoDeployError;
    use serde_json::json;

    #[test]
    fn test_deserialize_nested_tags() {
        let op: Operation = serde_json::from_value(json!({
            "resource": "project",
            "operation": "get",
            "projectId": "proj-1",
        }))
        .unwrap();
        assert_eq!(
            op,
            Operation::Project(ProjectOp::Get { project_id: "proj-1".to_string() })
        );
        assert_eq!(op.resource(), "project");
    }

    #[test]
    fn test_unit_operation() {
        let op: Operation =
            serde_json::from_value(json!({"resource": "organization", "operation": "get"}))
                .unwrap();
        let plan = op.plan("org-9").unwrap();
        assert_eq!(plan.path, "/organizations/org-9");
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let result: Result<Operation, _> =
            serde_json::from_value(json!({"resource": "project", "operation": "archive"}));
        assert!(result.is_err());

        let result: Result<Operation, _> =
            serde_json::from_value(json!({"resource": "billing", "operation": "get"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_validates_first() {
        let op = Operation::Deployment(DeploymentOp::Get { deployment_id: String::new() });
        assert!(matches!(op.plan("org"), Err(DenoDeployError::Validation(_))));
    }

    #[test]
    fn test_list_defaults() {
        let op: Operation = serde_json::from_value(json!({
            "resource": "kvDatabase",
            "operation": "list",
        }))
        .unwrap();
        let plan = op.plan("org").unwrap();
        assert_eq!(plan.fetch, FetchMode::Single);
        assert_eq!(plan.query["limit"], DEFAULT_LIST_LIMIT.to_string());
    }

    #[test]
    fn test_environment_variable_resource_name() {
        let op: Operation = serde_json::from_value(json!({
            "resource": "environmentVariable",
            "operation": "list",
            "projectId": "p",
        }))
        .unwrap();
        assert_eq!(op.plan("org").unwrap().path, "/projects/p/env");
    }
}
