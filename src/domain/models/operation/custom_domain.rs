//! Custom domain operations.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::plan::{check_limit, list_plan, require, RequestPlan};
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum DomainOp {
    List {
        project_id: String,
        #[serde(default)]
        return_all: bool,
        #[serde(default)]
        limit: Option<u32>,
    },
    Add {
        project_id: String,
        domain: String,
    },
    Get {
        domain_id: String,
    },
    Delete {
        domain_id: String,
    },
    Verify {
        domain_id: String,
    },
    GetCertificates {
        domain_id: String,
    },
    ProvisionCertificate {
        domain_id: String,
    },
}

impl DomainOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::List { project_id, return_all, limit } => {
                require("projectId", project_id)?;
                check_limit(*return_all, *limit)
            }
            Self::Add { project_id, domain } => {
                require("projectId", project_id)?;
                require("domain", domain)
            }
            Self::Get { domain_id }
            | Self::Delete { domain_id }
            | Self::Verify { domain_id }
            | Self::GetCertificates { domain_id }
            | Self::ProvisionCertificate { domain_id } => require("domainId", domain_id),
        }
    }

    pub fn plan(&self) -> RequestPlan {
        match self {
            Self::List { project_id, return_all, limit } => {
                list_plan(format!("/projects/{project_id}/domains"), *return_all, *limit)
            }
            Self::Add { project_id, domain } => {
                RequestPlan::post(format!("/projects/{project_id}/domains"))
                    .with_body(json!({ "domain": domain }))
            }
            Self::Get { domain_id } => RequestPlan::get(format!("/domains/{domain_id}")),
            Self::Delete { domain_id } => RequestPlan::delete(format!("/domains/{domain_id}")),
            Self::Verify { domain_id } => RequestPlan::post(format!("/domains/{domain_id}/verify")),
            Self::GetCertificates { domain_id } => {
                RequestPlan::get(format!("/domains/{domain_id}/certificates"))
            }
            Self::ProvisionCertificate { domain_id } => {
                RequestPlan::post(format!("/domains/{domain_id}/certificates"))
            }
        }
    }
}
