use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::poll_state::PollState;
use crate::domain::ports::poll_state_store::PollStateStore;

/// Poll state for every trigger key, stored as one JSON object on disk.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a crash mid-write leaves the previous state intact.
#[derive(Debug)]
pub struct JsonFilePollStateStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFilePollStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> DomainResult<HashMap<String, PollState>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                DenoDeployError::State(format!("corrupt state file {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(self.io_error("read", &e)),
        }
    }

    async fn write_all(&self, states: &HashMap<String, PollState>) -> DomainResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", &e))?;
        }

        let json = serde_json::to_string_pretty(states)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| self.io_error("write", &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error("replace", &e))
    }

    fn io_error(&self, action: &str, err: &std::io::Error) -> DenoDeployError {
        DenoDeployError::State(format!(
            "failed to {action} state file {}: {err}",
            self.path.display()
        ))
    }
}

#[async_trait]
impl PollStateStore for JsonFilePollStateStore {
    async fn load(&self, key: &str) -> DomainResult<PollState> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key).unwrap_or_default())
    }

    async fn save(&self, key: &str, state: &PollState) -> DomainResult<()> {
        let _guard = self.lock.lock().await;
        let mut states = self.read_all().await?;
        states.insert(key.to_string(), state.clone());
        self.write_all(&states).await?;
        debug!(key, path = %self.path.display(), "Saved poll state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::deployment::DeploymentStatus;
    use tempfile::TempDir;

    fn sample_state() -> PollState {
        let mut state = PollState::new();
        state.last_deployment_id = Some("d2".to_string());
        state
            .last_deployment_statuses
            .insert("d2".to_string(), DeploymentStatus::Building);
        state
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_state() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePollStateStore::new(dir.path().join("state.json"));
        assert!(store.load("any").await.unwrap().is_first_poll());
    }

    #[tokio::test]
    async fn test_save_creates_parent_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/state.json");
        let store = JsonFilePollStateStore::new(&path);

        store.save("p1:deployment.any", &sample_state()).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let reopened = JsonFilePollStateStore::new(&path);
        assert_eq!(reopened.load("p1:deployment.any").await.unwrap(), sample_state());
    }

    #[tokio::test]
    async fn test_save_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePollStateStore::new(dir.path().join("state.json"));

        store.save("a", &sample_state()).await.unwrap();
        store.save("b", &PollState::new()).await.unwrap();

        assert_eq!(store.load("a").await.unwrap(), sample_state());
        assert!(store.load("b").await.unwrap().is_first_poll());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFilePollStateStore::new(&path);
        assert!(matches!(
            store.load("a").await,
            Err(DenoDeployError::State(_))
        ));
    }
}
