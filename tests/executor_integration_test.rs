//! Operation executor against a mock Deno Deploy API.

mod common;

use deno_deploy::{DenoDeployError, OperationExecutor};
use mockito::{Matcher, Server};
use serde_json::json;

use common::{static_credentials, test_client};

fn executor(base_url: &str) -> OperationExecutor {
    OperationExecutor::new(test_client(base_url), static_credentials())
}

#[tokio::test]
async fn test_list_projects_fans_out_items() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/organizations/org-test/projects")
        .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
        .with_status(200)
        .with_body(r#"[{"id":"p1"},{"id":"p2"}]"#)
        .create_async()
        .await;

    let items = executor(&server.url())
        .execute_json(
            &[json!({"resource": "project", "operation": "list", "limit": 5})],
            false,
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.item_index == 0));
    assert_eq!(items[1].json["id"], "p2");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_return_all_collects_every_page() {
    let mut server = Server::new_async().await;
    let _p1 = server
        .mock("GET", "/projects/p1/domains")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"domains":[{"domain":"a.dev"},{"domain":"b.dev"}]}"#)
        .create_async()
        .await;
    let _p2 = server
        .mock("GET", "/projects/p1/domains")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"domains":[]}"#)
        .create_async()
        .await;

    let items = executor(&server.url())
        .execute_json(
            &[json!({
                "resource": "domain",
                "operation": "list",
                "projectId": "p1",
                "returnAll": true,
            })],
            false,
        )
        .await
        .unwrap();

    let names: Vec<_> = items.iter().map(|i| i.json["domain"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["a.dev", "b.dev"]);
}

#[tokio::test]
async fn test_set_environment_variables_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/projects/p1/env")
        .match_body(Matcher::Json(json!({"API_KEY": "secret", "PORT": "8080"})))
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let items = executor(&server.url())
        .execute_json(
            &[json!({
                "resource": "environmentVariable",
                "operation": "set",
                "projectId": "p1",
                "envVars": [
                    {"key": "API_KEY", "value": "secret"},
                    {"key": "PORT", "value": 8080},
                    {"value": "dropped"},
                ],
            })],
            false,
        )
        .await
        .unwrap();

    assert_eq!(items[0].json, json!({"success": true}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_build_logs_gain_project_id() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/deployments/d1/build_logs")
        .with_status(200)
        .with_body(r#"{"logs":[{"level":"info","message":"done"}]}"#)
        .create_async()
        .await;

    let items = executor(&server.url())
        .execute_json(
            &[json!({
                "resource": "buildLog",
                "operation": "get",
                "projectId": "p1",
                "deploymentId": "d1",
            })],
            false,
        )
        .await
        .unwrap();

    assert_eq!(items[0].json["projectId"], "p1");
}

#[tokio::test]
async fn test_continue_on_fail_mixes_errors_and_results() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/deployments/gone")
        .with_status(404)
        .with_body(r#"{"error":{"code":"deploymentNotFound","message":"Deployment not found"}}"#)
        .create_async()
        .await;
    let _ok = server
        .mock("GET", "/deployments/d2")
        .with_status(200)
        .with_body(r#"{"id":"d2","status":"success"}"#)
        .create_async()
        .await;

    let items = executor(&server.url())
        .execute_json(
            &[
                json!({"resource": "deployment", "operation": "get", "deploymentId": "gone"}),
                json!({"resource": "analytics", "operation": "getProject", "projectId": "p1", "since": "last week"}),
                json!({"resource": "deployment", "operation": "get", "deploymentId": "d2"}),
            ],
            true,
        )
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].json["error"], "Deno Deploy API error (404): Deployment not found");
    assert!(items[1].json["error"].as_str().unwrap().starts_with("Validation failed"));
    assert_eq!(items[2].json["id"], "d2");
    assert_eq!(items[2].item_index, 2);
}

#[tokio::test]
async fn test_abort_reports_failing_index() {
    let mut server = Server::new_async().await;
    let _ok = server
        .mock("GET", "/regions")
        .with_status(200)
        .with_body(r#"{"regions":[{"id":"gcp-us-east1"}]}"#)
        .create_async()
        .await;

    let err = executor(&server.url())
        .execute_json(
            &[
                json!({"resource": "region", "operation": "list"}),
                json!({"resource": "project", "operation": "update", "projectId": "p1"}),
            ],
            false,
        )
        .await
        .unwrap_err();

    assert_eq!(err.item_index, 1);
    assert!(matches!(err.source, DenoDeployError::Validation(_)));
}
