//! Deno Deploy API credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DenoDeployError, DomainResult};

/// Name under which the adapter looks up its credential by default.
pub const DEFAULT_CREDENTIAL_NAME: &str = "denoDeployApi";

/// Access token plus the organization it is scoped to.
///
/// The token is redacted from `Debug` output so a credential can be logged
/// or embedded in error context without leaking it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    /// Personal access token from the Deno Deploy dashboard.
    pub access_token: String,
    /// Organization id, as shown in `dash.deno.com/orgs/{organizationId}`.
    pub organization_id: String,
}

impl Credential {
    /// Create a credential from its two parts.
    pub fn new(access_token: impl Into<String>, organization_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            organization_id: organization_id.into(),
        }
    }

    /// Reject credentials with an empty token or organization id.
    pub fn validate(&self) -> DomainResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(DenoDeployError::Credentials(
                "access token is empty".to_string(),
            ));
        }
        if self.organization_id.trim().is_empty() {
            return Err(DenoDeployError::Credentials(
                "organization id is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("organization_id", &self.organization_id)
            .finish()
    }
}
