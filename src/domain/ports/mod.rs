//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces the host or the bundled
//! infrastructure must implement:
//! - HttpTransport: issue one HTTP request
//! - CredentialProvider: look up a named credential
//! - PollStateStore: durable per-trigger poll state
//!
//! These traits keep the gateway, executor and trigger independent of any
//! specific HTTP client, secret store or storage backend.

pub mod credentials;
pub mod poll_state_store;
pub mod transport;

pub use credentials::CredentialProvider;
pub use poll_state_store::PollStateStore;
pub use transport::{HttpTransport, TransportRequest, TransportResponse};
