//! Deno Deploy adapter
//!
//! Exposes the Deno Deploy REST API as typed "resource + operation" actions
//! and surfaces deployment lifecycle events through a polling trigger.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): operations, request plans, deployments,
//!   events, errors and the port traits
//! - **Infrastructure Layer** (`infrastructure`): HTTP gateway, retry,
//!   pagination, configuration, logging, credentials and state storage
//! - **Service Layer** (`services`): operation executor and polling trigger
//! - **CLI Layer** (`cli`): the `deno-deploy` binary
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use deno_deploy::{Config, Credential, DenoDeployClient, OperationExecutor, StaticCredentials};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DenoDeployClient::from_config(&Config::default())?;
//!     let credentials = Arc::new(StaticCredentials::single(Credential::new("ddp_...", "org-id")));
//!     let executor = OperationExecutor::new(client, credentials);
//!     let op = serde_json::json!({"resource": "project", "operation": "list"});
//!     let items = executor.execute_json(&[op], false).await?;
//!     println!("{items:?}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DenoDeployError, DomainResult, ExecutionError};
pub use domain::models::{
    Config, Credential, Deployment, DeploymentEvent, DeploymentStatus, EventFilter, Operation,
    PollState, RequestPlan,
};
pub use domain::ports::{CredentialProvider, HttpTransport, PollStateStore};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::credentials::{FileCredentialProvider, StaticCredentials};
pub use infrastructure::http::{DenoDeployClient, RetryPolicy};
pub use infrastructure::state::{InMemoryPollStateStore, JsonFilePollStateStore};
pub use services::{DeploymentTrigger, ExecutionItem, OperationExecutor, TriggerRunner};
