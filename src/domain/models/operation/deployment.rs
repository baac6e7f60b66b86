//! Deployment operations.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::plan::{check_limit, list_plan, require, RequestPlan};
use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::params::{
    parse_assets, parse_database_bindings, parse_env_vars, Asset, AssetInput, DatabaseBinding,
    EnvVarEntry, DEFAULT_ASSET_ENCODING,
};

/// Entry point used for inline deployments and playgrounds.
pub const INLINE_ENTRY_POINT: &str = "main.ts";

/// Where the code of a new deployment comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DeploymentSource {
    /// Code uploaded as `main.ts`, plus optional extra files.
    Inline {
        code: String,
        #[serde(default)]
        assets: Vec<AssetInput>,
    },
    /// An entry point the platform fetches itself.
    Url { entry_point_url: String },
}

/// TypeScript compiler options forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_factory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_fragment_factory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsx_import_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum DeploymentOp {
    List {
        project_id: String,
        #[serde(default)]
        return_all: bool,
        #[serde(default)]
        limit: Option<u32>,
    },
    Create {
        project_id: String,
        source: DeploymentSource,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        env_vars: Vec<EnvVarEntry>,
        #[serde(default)]
        databases: Vec<DatabaseBinding>,
        #[serde(default)]
        compiler_options: Option<CompilerOptions>,
    },
    Get {
        deployment_id: String,
    },
    Delete {
        deployment_id: String,
    },
    Redeploy {
        deployment_id: String,
        #[serde(default)]
        description: Option<String>,
    },
    GetBuildLogs {
        deployment_id: String,
        #[serde(default)]
        level: Option<String>,
        #[serde(default)]
        cursor: Option<String>,
    },
    GetAppLogs {
        deployment_id: String,
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
        #[serde(default)]
        level: Option<String>,
        #[serde(default)]
        region: Option<String>,
        #[serde(default)]
        limit: Option<u32>,
        #[serde(default)]
        cursor: Option<String>,
    },
}

impl DeploymentOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::List { project_id, return_all, limit } => {
                require("projectId", project_id)?;
                check_limit(*return_all, *limit)
            }
            Self::Create { project_id, source, .. } => {
                require("projectId", project_id)?;
                match source {
                    DeploymentSource::Inline { code, assets } => {
                        require("code", code)?;
                        if assets.iter().any(|a| a.path.trim().is_empty()) {
                            return Err(DenoDeployError::validation("asset path is required"));
                        }
                        Ok(())
                    }
                    DeploymentSource::Url { entry_point_url } => {
                        require("entryPointUrl", entry_point_url)
                    }
                }
            }
            Self::Get { deployment_id }
            | Self::Delete { deployment_id }
            | Self::Redeploy { deployment_id, .. }
            | Self::GetBuildLogs { deployment_id, .. }
            | Self::GetAppLogs { deployment_id, .. } => require("deploymentId", deployment_id),
        }
    }

    pub fn plan(&self) -> DomainResult<RequestPlan> {
        Ok(match self {
            Self::List { project_id, return_all, limit } => {
                list_plan(format!("/projects/{project_id}/deployments"), *return_all, *limit)
            }
            Self::Create {
                project_id,
                source,
                description,
                env_vars,
                databases,
                compiler_options,
            } => {
                let mut body = source_body(source);
                if let Some(description) = description.as_deref().filter(|d| !d.is_empty()) {
                    body["description"] = json!(description);
                }
                if !env_vars.is_empty() {
                    body["envVars"] = json!(parse_env_vars(env_vars));
                }
                if !databases.is_empty() {
                    body["databases"] = json!(parse_database_bindings(databases));
                }
                if let Some(options) = compiler_options {
                    body["compilerOptions"] = serde_json::to_value(options)?;
                }
                RequestPlan::post(format!("/projects/{project_id}/deployments")).with_body(body)
            }
            Self::Get { deployment_id } => {
                RequestPlan::get(format!("/deployments/{deployment_id}"))
            }
            Self::Delete { deployment_id } => {
                RequestPlan::delete(format!("/deployments/{deployment_id}"))
            }
            Self::Redeploy { deployment_id, description } => {
                let body = match description.as_deref().filter(|d| !d.is_empty()) {
                    Some(description) => json!({ "description": description }),
                    None => json!({}),
                };
                RequestPlan::post(format!("/deployments/{deployment_id}/redeploy")).with_body(body)
            }
            Self::GetBuildLogs { deployment_id, level, cursor } => {
                RequestPlan::get(format!("/deployments/{deployment_id}/build_logs"))
                    .with_query("level", level.as_ref())
                    .with_query("cursor", cursor.as_ref())
            }
            Self::GetAppLogs {
                deployment_id,
                since,
                until,
                level,
                region,
                limit,
                cursor,
            } => RequestPlan::get(format!("/deployments/{deployment_id}/app_logs"))
                .with_query("since", since.as_ref())
                .with_query("until", until.as_ref())
                .with_query("level", level.as_ref())
                .with_query("region", region.as_ref())
                .with_query("limit", limit.filter(|l| *l > 0))
                .with_query("cursor", cursor.as_ref()),
        })
    }
}

fn source_body(source: &DeploymentSource) -> Value {
    match source {
        DeploymentSource::Inline { code, assets } => {
            let mut files = std::collections::BTreeMap::new();
            files.insert(
                INLINE_ENTRY_POINT.to_string(),
                Asset::file(code.clone(), DEFAULT_ASSET_ENCODING),
            );
            files.extend(parse_assets(assets));
            json!({ "entryPointUrl": INLINE_ENTRY_POINT, "assets": files })
        }
        DeploymentSource::Url { entry_point_url } => {
            json!({ "entryPointUrl": entry_point_url, "assets": {} })
        }
    }
}
