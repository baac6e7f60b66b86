//! Project operations.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::plan::{check_date, check_limit, list_plan, require, with_time_range, RequestPlan};
use crate::domain::errors::{DenoDeployError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ProjectOp {
    List {
        #[serde(default)]
        return_all: bool,
        #[serde(default)]
        limit: Option<u32>,
    },
    Create {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    Get {
        project_id: String,
    },
    Update {
        project_id: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    Delete {
        project_id: String,
    },
    GetAnalytics {
        project_id: String,
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
}

impl ProjectOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::List { return_all, limit } => check_limit(*return_all, *limit),
            Self::Create { name, .. } => require("name", name),
            Self::Get { project_id } | Self::Delete { project_id } => {
                require("projectId", project_id)
            }
            Self::Update { project_id, name, description } => {
                require("projectId", project_id)?;
                if name.is_none() && description.is_none() {
                    return Err(DenoDeployError::validation(
                        "project update needs at least one of name or description",
                    ));
                }
                Ok(())
            }
            Self::GetAnalytics { project_id, since, until } => {
                require("projectId", project_id)?;
                check_date("since", since.as_deref())?;
                check_date("until", until.as_deref())
            }
        }
    }

    pub fn plan(&self, org_id: &str) -> DomainResult<RequestPlan> {
        Ok(match self {
            Self::List { return_all, limit } => {
                list_plan(format!("/organizations/{org_id}/projects"), *return_all, *limit)
            }
            Self::Create { name, description } => {
                let mut body = json!({ "name": name });
                if let Some(description) = description.as_deref().filter(|d| !d.is_empty()) {
                    body["description"] = json!(description);
                }
                RequestPlan::post(format!("/organizations/{org_id}/projects")).with_body(body)
            }
            Self::Get { project_id } => RequestPlan::get(format!("/projects/{project_id}")),
            Self::Update { project_id, name, description } => {
                let mut fields = Map::new();
                if let Some(name) = name {
                    fields.insert("name".to_string(), json!(name));
                }
                if let Some(description) = description {
                    fields.insert("description".to_string(), json!(description));
                }
                RequestPlan::patch(format!("/projects/{project_id}"))
                    .with_body(Value::Object(fields))
            }
            Self::Delete { project_id } => RequestPlan::delete(format!("/projects/{project_id}")),
            Self::GetAnalytics { project_id, since, until } => with_time_range(
                RequestPlan::get(format!("/projects/{project_id}/analytics")),
                since.as_deref(),
                until.as_deref(),
            )?,
        })
    }
}
