//! HTTP access to the Deno Deploy REST API
//!
//! - `transport`: `reqwest` implementation of the transport port
//! - `gateway`: single authenticated request with error normalization
//! - `retry`: 429 retry with exponential backoff
//! - `pagination`: page-based and cursor-based exhaustive fetch
//! - `client`: the above composed into one client

pub mod client;
pub mod gateway;
pub mod pagination;
pub mod retry;
pub mod transport;

pub use client::DenoDeployClient;
pub use gateway::ApiGateway;
pub use retry::RetryPolicy;
pub use transport::ReqwestTransport;
