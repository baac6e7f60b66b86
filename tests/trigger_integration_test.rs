//! End-to-end trigger cycles: HTTP responses from a mock server, state
//! persisted to a JSON file between cycles.

mod common;

use std::sync::Arc;

use deno_deploy::domain::models::deployment::DeploymentStatus;
use deno_deploy::{
    DeploymentTrigger, EventFilter, JsonFilePollStateStore, PollStateStore, TriggerRunner,
};
use mockito::{Matcher, Server, ServerGuard};

use common::{setup_test_logging, static_credentials, temp_dir, test_client};

async fn mock_window(server: &mut ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/projects/proj-1/deployments")
        .match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
        .with_status(200)
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

fn runner(server: &ServerGuard, filter: EventFilter, store: Arc<dyn PollStateStore>) -> TriggerRunner {
    let trigger = DeploymentTrigger::new(
        test_client(&server.url()),
        static_credentials(),
        "proj-1",
        filter,
    );
    TriggerRunner::new(trigger, store)
}

#[tokio::test]
async fn test_poll_sequence_with_file_state() {
    setup_test_logging();
    let dir = temp_dir();
    let state_path = dir.path().join("state/trigger-state.json");
    let store: Arc<dyn PollStateStore> = Arc::new(JsonFilePollStateStore::new(&state_path));

    let mut server = Server::new_async().await;
    let m1 = mock_window(&mut server, r#"[{"id":"A","status":"pending"}]"#).await;
    let m2 = mock_window(&mut server, r#"[{"id":"A","status":"success","updatedAt":"2024-05-01T10:00:00.000Z"}]"#).await;
    let m3 = mock_window(
        &mut server,
        r#"{"deployments":[{"id":"B","status":"pending","createdAt":"2024-05-01T11:00:00.000Z"},{"id":"A","status":"success"}]}"#,
    )
    .await;

    let runner = runner(&server, EventFilter::Any, store.clone());

    // First cycle only seeds state.
    assert!(runner.run_once().await.is_none());
    let state = store.load(runner.key()).await.unwrap();
    assert_eq!(state.last_deployment_id.as_deref(), Some("A"));
    assert_eq!(state.status_of("A"), Some(&DeploymentStatus::Pending));

    let events = runner.run_once().await.expect("status change expected");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "deployment.success");
    assert_eq!(events[0].previous_status, Some(DeploymentStatus::Pending));
    assert_eq!(events[0].timestamp, "2024-05-01T10:00:00.000Z");
    assert_eq!(events[0].organization_id, common::TEST_ORG);

    let events = runner.run_once().await.expect("creation expected");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "deployment.created");
    assert_eq!(events[0].deployment.id, "B");
    assert_eq!(events[0].timestamp, "2024-05-01T11:00:00.000Z");

    let state = store.load(runner.key()).await.unwrap();
    assert_eq!(state.last_deployment_id.as_deref(), Some("B"));

    m1.assert_async().await;
    m2.assert_async().await;
    m3.assert_async().await;
}

#[tokio::test]
async fn test_created_filter_ignores_status_changes() {
    let dir = temp_dir();
    let store: Arc<dyn PollStateStore> =
        Arc::new(JsonFilePollStateStore::new(dir.path().join("state.json")));

    let mut server = Server::new_async().await;
    let _m1 = mock_window(&mut server, r#"[{"id":"A","status":"building"}]"#).await;
    let _m2 = mock_window(&mut server, r#"[{"id":"A","status":"failed"}]"#).await;

    let runner = runner(&server, EventFilter::Created, store);
    assert!(runner.run_once().await.is_none());
    assert!(runner.run_once().await.is_none());
}

#[tokio::test]
async fn test_api_failure_keeps_state_for_next_cycle() {
    let dir = temp_dir();
    let store: Arc<dyn PollStateStore> =
        Arc::new(JsonFilePollStateStore::new(dir.path().join("state.json")));

    let mut server = Server::new_async().await;
    let _seed = mock_window(&mut server, r#"[{"id":"A","status":"building"}]"#).await;
    let _down = server
        .mock("GET", "/projects/proj-1/deployments")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body(r#"{"message":"maintenance"}"#)
        .expect(1)
        .create_async()
        .await;
    let _back = mock_window(&mut server, r#"[{"id":"A","status":"failed"}]"#).await;

    let runner = runner(&server, EventFilter::Failed, store.clone());
    assert!(runner.run_once().await.is_none());
    let seeded = store.load(runner.key()).await.unwrap();

    assert!(runner.run_once().await.is_none());
    assert_eq!(store.load(runner.key()).await.unwrap(), seeded);

    let events = runner.run_once().await.expect("failure transition expected");
    assert_eq!(events[0].event, "deployment.failed");
    assert_eq!(events[0].previous_status, Some(DeploymentStatus::Building));
}
