//! Live Deno Deploy API tests.
//!
//! Ignored by default. Run with
//! `DENO_DEPLOY_ACCESS_TOKEN=... DENO_DEPLOY_ORGANIZATION_ID=... cargo test -- --ignored`.

mod common;

use std::sync::Arc;

use deno_deploy::{Config, Credential, DenoDeployClient, OperationExecutor, StaticCredentials};
use serde_json::json;

fn live_credential() -> Option<Credential> {
    let token = std::env::var("DENO_DEPLOY_ACCESS_TOKEN").ok()?;
    let org = std::env::var("DENO_DEPLOY_ORGANIZATION_ID").ok()?;
    Some(Credential::new(token, org))
}

#[tokio::test]
#[ignore = "requires DENO_DEPLOY_ACCESS_TOKEN and DENO_DEPLOY_ORGANIZATION_ID"]
async fn test_live_verify_credentials() {
    let Some(credential) = live_credential() else {
        eprintln!("Skipping: live credentials not set");
        return;
    };
    let client = DenoDeployClient::from_config(&Config::default()).unwrap();
    let org = client.verify_credentials(&credential).await.unwrap();
    assert!(org.is_object());
}

#[tokio::test]
#[ignore = "requires DENO_DEPLOY_ACCESS_TOKEN and DENO_DEPLOY_ORGANIZATION_ID"]
async fn test_live_list_projects() {
    common::setup_test_logging();
    let Some(credential) = live_credential() else {
        eprintln!("Skipping: live credentials not set");
        return;
    };
    let client = DenoDeployClient::from_config(&Config::default()).unwrap();
    let executor = OperationExecutor::new(client, Arc::new(StaticCredentials::single(credential)));

    let items = executor
        .execute_json(&[json!({"resource": "project", "operation": "list", "limit": 1})], false)
        .await
        .unwrap();
    assert!(items.iter().all(|i| i.item_index == 0));
}
