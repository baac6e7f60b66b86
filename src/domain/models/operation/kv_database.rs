//! Deno KV database operations.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::plan::{check_limit, list_plan, require, RequestPlan};
use crate::domain::errors::{DenoDeployError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum KvDatabaseOp {
    List {
        #[serde(default)]
        return_all: bool,
        #[serde(default)]
        limit: Option<u32>,
    },
    Create {
        #[serde(default)]
        description: Option<String>,
    },
    Get {
        database_id: String,
    },
    Update {
        database_id: String,
        #[serde(default)]
        description: Option<String>,
    },
    Delete {
        database_id: String,
    },
}

impl KvDatabaseOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::List { return_all, limit } => check_limit(*return_all, *limit),
            Self::Create { .. } => Ok(()),
            Self::Get { database_id } | Self::Delete { database_id } => {
                require("databaseId", database_id)
            }
            Self::Update { database_id, description } => {
                require("databaseId", database_id)?;
                if description.is_none() {
                    return Err(DenoDeployError::validation(
                        "database update needs a description",
                    ));
                }
                Ok(())
            }
        }
    }

    pub fn plan(&self, org_id: &str) -> RequestPlan {
        match self {
            Self::List { return_all, limit } => {
                list_plan(format!("/organizations/{org_id}/databases"), *return_all, *limit)
            }
            Self::Create { description } => {
                let body = match description.as_deref().filter(|d| !d.is_empty()) {
                    Some(description) => json!({ "description": description }),
                    None => json!({}),
                };
                RequestPlan::post(format!("/organizations/{org_id}/databases")).with_body(body)
            }
            Self::Get { database_id } => RequestPlan::get(format!("/databases/{database_id}")),
            Self::Update { database_id, description } => {
                RequestPlan::patch(format!("/databases/{database_id}"))
                    .with_body(json!({ "description": description }))
            }
            Self::Delete { database_id } => {
                RequestPlan::delete(format!("/databases/{database_id}"))
            }
        }
    }
}
