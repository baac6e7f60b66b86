//! Infrastructure layer
//!
//! Concrete implementations of the domain ports and the ambient services
//! around them: configuration, logging, HTTP access to the Deno Deploy API,
//! credential lookup and poll state storage.

pub mod config;
pub mod credentials;
pub mod http;
pub mod logging;
pub mod state;
