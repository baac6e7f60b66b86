//! TLS certificate operations.

use serde::{Deserialize, Serialize};

use super::plan::{require, RequestPlan};
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum CertificateOp {
    List { domain_id: String },
    Provision { domain_id: String },
    Get { certificate_id: String },
}

impl CertificateOp {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::List { domain_id } | Self::Provision { domain_id } => {
                require("domainId", domain_id)
            }
            Self::Get { certificate_id } => require("certificateId", certificate_id),
        }
    }

    pub fn plan(&self) -> RequestPlan {
        match self {
            Self::List { domain_id } => RequestPlan::get(format!("/domains/{domain_id}/certificates")),
            Self::Provision { domain_id } => {
                RequestPlan::post(format!("/domains/{domain_id}/certificates"))
            }
            Self::Get { certificate_id } => {
                RequestPlan::get(format!("/certificates/{certificate_id}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::operation::HttpMethod;

    #[test]
    fn test_certificate_paths() {
        let get = CertificateOp::Get { certificate_id: "c1".to_string() }.plan();
        assert_eq!(get.path, "/certificates/c1");

        let provision = CertificateOp::Provision { domain_id: "d1".to_string() }.plan();
        assert_eq!(provision.method, HttpMethod::Post);
        assert_eq!(provision.path, "/domains/d1/certificates");
    }
}
