//! Domain layer for the Deno Deploy adapter
//!
//! This module contains the typed operations, deployment models, poll state
//! and the ports through which the adapter reaches the outside world.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DenoDeployError, DomainResult, ExecutionError};
