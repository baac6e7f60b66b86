//! CLI command implementations.

pub mod exec;
pub mod poll;
pub mod verify;
pub mod watch;
