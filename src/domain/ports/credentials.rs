//! Credential lookup port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::credentials::Credential;

/// Port for resolving a credential by name from the host's credential store.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Fetch the credential registered under `name`.
    ///
    /// Fails with `DenoDeployError::Credentials` when it is missing or
    /// incomplete.
    async fn credential(&self, name: &str) -> DomainResult<Credential>;
}
