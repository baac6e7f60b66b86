//! Service layer
//!
//! - `executor`: runs typed operations and normalizes their responses
//! - `trigger`: deployment lifecycle event detection
//! - `trigger_runner`: persisted, repeated trigger cycles

pub mod executor;
pub mod trigger;
pub mod trigger_runner;

pub use executor::{normalize_response, ExecutionItem, OperationExecutor};
pub use trigger::{detect_events, DeploymentTrigger, DEFAULT_WINDOW_SIZE};
pub use trigger_runner::TriggerRunner;
