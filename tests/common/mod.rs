//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across multiple integration test files.

#![allow(dead_code)]

use std::sync::Arc;

use deno_deploy::{Config, Credential, DenoDeployClient, StaticCredentials};
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "ddp_test_token";
pub const TEST_ORG: &str = "org-test";

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Configuration pointing at a mock server, with fast retries and small pages.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = 5;
    config.retry.base_delay_ms = 1;
    config.retry.max_delay_ms = 10;
    config.pagination.page_size = 2;
    config.pagination.cursor_page_size = 2;
    config
}

pub fn test_client(base_url: &str) -> DenoDeployClient {
    DenoDeployClient::from_config(&test_config(base_url)).expect("Failed to create client")
}

pub fn test_credential() -> Credential {
    Credential::new(TEST_TOKEN, TEST_ORG)
}

pub fn static_credentials() -> Arc<StaticCredentials> {
    Arc::new(StaticCredentials::single(test_credential()))
}

/// Initialize a test-writer subscriber; safe to call from every test.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
