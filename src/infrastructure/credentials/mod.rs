//! Credentials management infrastructure
//!
//! Bundled implementations of the [`CredentialProvider`] port:
//! - `StaticCredentials`: credentials held in memory, for hosts and tests
//! - `FileCredentialProvider`: named credentials read from a YAML file
//!
//! Neither reads the process environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::credentials::{Credential, DEFAULT_CREDENTIAL_NAME};
use crate::domain::ports::credentials::CredentialProvider;

/// Default location of the credentials file.
pub const DEFAULT_CREDENTIALS_PATH: &str = ".deno-deploy/credentials.yaml";

/// In-memory credentials keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    credentials: HashMap<String, Credential>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider holding one credential under the default name.
    pub fn single(credential: Credential) -> Self {
        Self::new().with(DEFAULT_CREDENTIAL_NAME, credential)
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, credential: Credential) -> Self {
        self.credentials.insert(name.into(), credential);
        self
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credential(&self, name: &str) -> DomainResult<Credential> {
        let credential = self
            .credentials
            .get(name)
            .cloned()
            .ok_or_else(|| DenoDeployError::Credentials(format!("no credential named '{name}'")))?;
        credential.validate()?;
        Ok(credential)
    }
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    credentials: HashMap<String, Credential>,
}

/// Reads named credentials from a YAML file on every lookup.
///
/// ```yaml
/// credentials:
///   denoDeployApi:
///     accessToken: ddp_xxx
///     organizationId: 00000000-0000-0000-0000-000000000000
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialProvider {
    path: PathBuf,
}

impl FileCredentialProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> DomainResult<CredentialsFile> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DenoDeployError::Credentials(format!(
                "failed to read credentials file {}: {e}",
                self.path.display()
            ))
        })?;
        serde_yaml::from_str(&raw).map_err(|e| {
            DenoDeployError::Credentials(format!(
                "invalid credentials file {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl Default for FileCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIALS_PATH)
    }
}

#[async_trait]
impl CredentialProvider for FileCredentialProvider {
    async fn credential(&self, name: &str) -> DomainResult<Credential> {
        let mut file = self.read().await?;
        let credential = file.credentials.remove(name).ok_or_else(|| {
            DenoDeployError::Credentials(format!(
                "no credential named '{name}' in {}",
                self.path.display()
            ))
        })?;
        credential.validate()?;
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_static_lookup() {
        let provider = StaticCredentials::single(Credential::new("tok", "org"));
        let cred = provider.credential(DEFAULT_CREDENTIAL_NAME).await.unwrap();
        assert_eq!(cred.organization_id, "org");
        assert!(provider.credential("other").await.is_err());
    }

    #[tokio::test]
    async fn test_static_rejects_incomplete() {
        let provider = StaticCredentials::single(Credential::new("", "org"));
        assert!(matches!(
            provider.credential(DEFAULT_CREDENTIAL_NAME).await,
            Err(DenoDeployError::Credentials(_))
        ));
    }

    #[tokio::test]
    async fn test_file_provider() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "credentials:\n  denoDeployApi:\n    accessToken: ddp_test\n    organizationId: org-1\n  staging:\n    accessToken: ddp_stage\n    organizationId: org-2"
        )
        .unwrap();
        file.flush().unwrap();

        let provider = FileCredentialProvider::new(file.path());
        let cred = provider.credential("denoDeployApi").await.unwrap();
        assert_eq!(cred.access_token, "ddp_test");
        let staging = provider.credential("staging").await.unwrap();
        assert_eq!(staging.organization_id, "org-2");
        assert!(provider.credential("prod").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let provider = FileCredentialProvider::new("/nonexistent/credentials.yaml");
        let err = provider.credential("denoDeployApi").await.unwrap_err();
        assert!(err.to_string().contains("failed to read credentials file"));
    }
}
