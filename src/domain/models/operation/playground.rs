//! Playground operations.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::deployment::INLINE_ENTRY_POINT;
use super::plan::{require, RequestPlan};
use crate::domain::errors::DomainResult;
use crate::domain::models::params::{parse_env_vars, EnvVarEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum PlaygroundOp {
    Create {
        code: String,
        #[serde(default)]
        entry_point: Option<String>,
        #[serde(default)]
        env_vars: Vec<EnvVarEntry>,
    },
    Get {
        playground_id: String,
    },
    Delete {
        playground_id: String,
    },
}

impl PlaygroundOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Create { code, .. } => require("code", code),
            Self::Get { playground_id } | Self::Delete { playground_id } => {
                require("playgroundId", playground_id)
            }
        }
    }

    pub fn plan(&self, org_id: &str) -> RequestPlan {
        match self {
            Self::Create { code, entry_point, env_vars } => {
                let entry_point = entry_point
                    .as_deref()
                    .filter(|e| !e.is_empty())
                    .unwrap_or(INLINE_ENTRY_POINT);
                let mut body = json!({ "code": code, "entryPoint": entry_point });
                if !env_vars.is_empty() {
                    body["envVars"] = json!(parse_env_vars(env_vars));
                }
                RequestPlan::post(format!("/organizations/{org_id}/playgrounds")).with_body(body)
            }
            Self::Get { playground_id } => {
                RequestPlan::get(format!("/playgrounds/{playground_id}"))
            }
            Self::Delete { playground_id } => {
                RequestPlan::delete(format!("/playgrounds/{playground_id}"))
            }
        }
    }
}
