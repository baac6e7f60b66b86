//! Organization-scoped operations.

use serde::{Deserialize, Serialize};

use super::plan::{check_date, check_limit, list_plan, with_time_range, RequestPlan};
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum OrganizationOp {
    /// Details of the credential's organization.
    Get,
    GetAnalytics {
        #[serde(default)]
        since: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
    ListDomains {
        #[serde(default)]
        return_all: bool,
        #[serde(default)]
        limit: Option<u32>,
    },
}

impl OrganizationOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Get => Ok(()),
            Self::GetAnalytics { since, until } => {
                check_date("since", since.as_deref())?;
                check_date("until", until.as_deref())
            }
            Self::ListDomains { return_all, limit } => check_limit(*return_all, *limit),
        }
    }

    pub fn plan(&self, org_id: &str) -> DomainResult<RequestPlan> {
        Ok(match self {
            Self::Get => RequestPlan::get(format!("/organizations/{org_id}")),
            Self::GetAnalytics { since, until } => with_time_range(
                RequestPlan::get(format!("/organizations/{org_id}/analytics")),
                since.as_deref(),
                until.as_deref(),
            )?,
            Self::ListDomains { return_all, limit } => {
                list_plan(format!("/organizations/{org_id}/domains"), *return_all, *limit)
            }
        })
    }
}
