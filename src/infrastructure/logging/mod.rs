//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty output on stderr
//! - Optional rolling log files
//! - One-time startup notice

pub mod config;
pub mod logger;
pub mod notice;

pub use config::{LogConfig, LogFormat, RotationPolicy};
pub use logger::LoggerImpl;
pub use notice::log_startup_notice;
