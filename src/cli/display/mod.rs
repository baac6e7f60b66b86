//! Display helpers for CLI output.

pub mod table;

pub use table::*;
