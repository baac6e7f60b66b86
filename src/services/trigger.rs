//! Deployment lifecycle polling trigger.
//!
//! Each cycle fetches the most recent deployments of one project, compares
//! their statuses with the previous cycle's [`PollState`] and synthesizes
//! [`DeploymentEvent`]s. The very first cycle only seeds state. Failures are
//! logged and reported as "nothing new"; the caller's state is left as it
//! was so the next cycle retries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::credentials::{Credential, DEFAULT_CREDENTIAL_NAME};
use crate::domain::models::deployment::Deployment;
use crate::domain::models::envelope::collect_items;
use crate::domain::models::event::{DeploymentEvent, EventFilter};
use crate::domain::models::operation::{HttpMethod, Query};
use crate::domain::models::poll_state::PollState;
use crate::domain::ports::credentials::CredentialProvider;
use crate::infrastructure::http::DenoDeployClient;
use crate::infrastructure::logging::notice::log_startup_notice;

/// Deployments inspected per cycle unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: u32 = 10;

/// Polls one project for deployment events.
pub struct DeploymentTrigger {
    client: DenoDeployClient,
    credentials: Arc<dyn CredentialProvider>,
    credential_name: String,
    project_id: String,
    filter: EventFilter,
    window_size: u32,
}

impl DeploymentTrigger {
    pub fn new(
        client: DenoDeployClient,
        credentials: Arc<dyn CredentialProvider>,
        project_id: impl Into<String>,
        filter: EventFilter,
    ) -> Self {
        Self {
            client,
            credentials,
            credential_name: DEFAULT_CREDENTIAL_NAME.to_string(),
            project_id: project_id.into(),
            filter,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    #[must_use]
    pub fn with_credential_name(mut self, name: impl Into<String>) -> Self {
        self.credential_name = name.into();
        self
    }

    #[must_use]
    pub fn with_window_size(mut self, window_size: u32) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn filter(&self) -> EventFilter {
        self.filter
    }

    /// Key under which this trigger's state is stored.
    pub fn key(&self) -> String {
        format!("{}:{}", self.project_id, self.filter)
    }

    /// Run one cycle against `state`.
    ///
    /// Returns `None` when there is nothing to report, including when the
    /// cycle failed. `state` is only updated by a cycle that succeeded.
    pub async fn poll(&self, state: &mut PollState) -> Option<Vec<DeploymentEvent>> {
        log_startup_notice(self.client.base_url());

        match self.try_poll(state).await {
            Ok(events) if events.is_empty() => None,
            Ok(events) => {
                info!(
                    project_id = %self.project_id,
                    filter = %self.filter,
                    count = events.len(),
                    "Deployment events detected"
                );
                Some(events)
            }
            Err(e) => {
                error!(
                    project_id = %self.project_id,
                    error = %e,
                    "Deno Deploy trigger poll failed"
                );
                None
            }
        }
    }

    async fn try_poll(&self, state: &mut PollState) -> DomainResult<Vec<DeploymentEvent>> {
        let credential = self.credentials.credential(&self.credential_name).await?;
        let deployments = self.fetch_deployments(&credential).await?;

        debug!(
            project_id = %self.project_id,
            fetched = deployments.len(),
            first_poll = state.is_first_poll(),
            "Fetched recent deployments"
        );

        let (events, next) = detect_events(
            &deployments,
            state,
            self.filter,
            &credential.organization_id,
            &self.project_id,
        );
        *state = next;
        Ok(events)
    }

    /// Newest-first deployments of the watched project.
    async fn fetch_deployments(&self, credential: &Credential) -> DomainResult<Vec<Deployment>> {
        let path = format!("/projects/{}/deployments", self.project_id);
        let mut query = Query::new();
        query.insert("limit".to_string(), self.window_size.to_string());

        let response = self
            .client
            .request(credential, HttpMethod::Get, &path, None, &query)
            .await?;

        Ok(parse_deployments(collect_items(&response)))
    }
}

/// Decode deployment rows one by one.
///
/// A row that does not decode is logged and skipped so the rest of the
/// window is still diffed.
pub fn parse_deployments(items: Vec<Value>) -> Vec<Deployment> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value::<Deployment>(item) {
            Ok(deployment) => Some(deployment),
            Err(e) => {
                warn!(position, error = %e, "Skipping deployment that failed to decode");
                None
            }
        })
        .collect()
}

/// Diff a newest-first window of deployments against the previous state.
///
/// Returns the events in oldest-to-newest order together with the state the
/// next cycle should start from. The status map of the new state holds
/// exactly the deployments of this window.
pub fn detect_events(
    deployments: &[Deployment],
    state: &PollState,
    filter: EventFilter,
    organization_id: &str,
    project_id: &str,
) -> (Vec<DeploymentEvent>, PollState) {
    let first_poll = state.is_first_poll();
    let mut events = Vec::new();
    let mut statuses = HashMap::with_capacity(deployments.len());

    for deployment in deployments.iter().rev() {
        let previous = state.status_of(&deployment.id);
        statuses.insert(deployment.id.clone(), deployment.status.clone());

        if first_poll {
            continue;
        }

        let event = match previous {
            None if filter.accepts_created() => Some(DeploymentEvent {
                event: DeploymentEvent::CREATED.to_string(),
                deployment: deployment.clone(),
                previous_status: None,
                organization_id: organization_id.to_string(),
                project_id: project_id.to_string(),
                timestamp: timestamp_or_now(deployment.created_at.as_deref()),
            }),
            Some(prev) if *prev != deployment.status && filter.accepts_transition(&deployment.status) => {
                Some(DeploymentEvent {
                    event: DeploymentEvent::transition_name(&deployment.status),
                    deployment: deployment.clone(),
                    previous_status: Some(prev.clone()),
                    organization_id: organization_id.to_string(),
                    project_id: project_id.to_string(),
                    timestamp: timestamp_or_now(deployment.updated_at.as_deref()),
                })
            }
            _ => None,
        };
        events.extend(event);
    }

    let last_deployment_id = deployments
        .first()
        .map(|d| d.id.clone())
        .or_else(|| state.last_deployment_id.clone());

    let next = PollState {
        last_deployment_id,
        last_deployment_statuses: statuses,
    };
    (events, next)
}

fn timestamp_or_now(ts: Option<&str>) -> String {
    ts.filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}
