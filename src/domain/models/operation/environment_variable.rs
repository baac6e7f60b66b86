//! Project environment variable operations.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::plan::{require, RequestPlan};
use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::params::{parse_env_vars, EnvVarEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum EnvironmentVariableOp {
    List {
        project_id: String,
    },
    /// Upsert variables; keys not listed are left alone.
    Set {
        project_id: String,
        env_vars: Vec<EnvVarEntry>,
    },
    Delete {
        project_id: String,
        key: String,
    },
}

impl EnvironmentVariableOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::List { project_id } => require("projectId", project_id),
            Self::Set { project_id, env_vars } => {
                require("projectId", project_id)?;
                if parse_env_vars(env_vars).is_empty() {
                    return Err(DenoDeployError::validation(
                        "at least one environment variable with a key is required",
                    ));
                }
                Ok(())
            }
            Self::Delete { project_id, key } => {
                require("projectId", project_id)?;
                require("key", key)
            }
        }
    }

    pub fn plan(&self) -> RequestPlan {
        match self {
            Self::List { project_id } => RequestPlan::get(format!("/projects/{project_id}/env")),
            Self::Set { project_id, env_vars } => {
                RequestPlan::patch(format!("/projects/{project_id}/env"))
                    .with_body(json!(parse_env_vars(env_vars)))
            }
            Self::Delete { project_id, key } => {
                RequestPlan::delete(format!("/projects/{project_id}/env/{key}"))
            }
        }
    }
}
