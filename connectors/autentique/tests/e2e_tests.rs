//! Binary tests over the stdio protocol.

use assert_cmd::cargo::cargo_bin_cmd;
use flow_testkit::{MockGraphqlServer, fixtures};
use predicates::prelude::*;
use serde_json::{Value, json};

/// Feed newline-separated requests and return the parsed responses.
fn run_node(requests: &[Value]) -> Vec<Value> {
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let output = cargo_bin_cmd!("flow-autentique")
        .env("RUST_LOG", "warn")
        .write_stdin(input)
        .output()
        .expect("run flow-autentique");
    assert!(output.status.success(), "node exited with {:?}", output.status);
    String::from_utf8(output.stdout)
        .expect("stdout utf8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect()
}

#[test]
fn describe_lists_node_and_credentials() {
    let responses = run_node(&[json!({"id": 1, "method": "describe"})]);
    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(responses[0]["jsonrpc"], "2.0");
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(result["node"]["displayName"], "Autentique");
    assert_eq!(result["node"]["properties"][0]["name"], "resource");
    assert_eq!(result["credentials"][0]["name"], "autentiqueApi");
    assert_eq!(
        result["credentials"][0]["properties"][0]["typeOptions"]["password"],
        true
    );
}

#[test]
fn unknown_method_is_an_error_response() {
    let responses = run_node(&[json!({"id": "a", "method": "introspect"})]);
    assert_eq!(responses[0]["id"], "a");
    assert_eq!(responses[0]["error"]["code"], "NODE-1002");
    assert!(responses[0].get("result").is_none());
}

#[test]
fn invalid_json_does_not_stop_the_loop() {
    let output = cargo_bin_cmd!("flow-autentique")
        .env("RUST_LOG", "warn")
        .write_stdin("{not json\n\n{\"id\":2,\"method\":\"health\"}\n")
        .output()
        .expect("run flow-autentique");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout utf8");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["error"]["code"], "NODE-1002");
    assert!(lines[0]["error"]["message"].as_str().unwrap().starts_with("Invalid JSON"));
    assert_eq!(lines[1]["result"]["status"], "not_configured");
}

#[test]
fn logs_go_to_stderr() {
    cargo_bin_cmd!("flow-autentique")
        .env("RUST_LOG", "info")
        .write_stdin("{\"id\":1,\"method\":\"health\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"jsonrpc\":\"2.0\""))
        .stdout(predicate::str::contains("starting").not())
        .stderr(predicate::str::contains("Autentique node starting"));
}

#[tokio::test(flavor = "multi_thread")]
async fn configure_then_execute_against_mock_endpoint() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_data_with_bearer(fixtures::TEST_API_TOKEN, json!({"folder": {"id": "f-1", "name": "Contracts"}}))
        .await;

    let requests = vec![
        json!({"id": 1, "method": "configure", "params": {"api_url": mock.endpoint(), "timeout": 5}}),
        json!({"id": 2, "method": "execute", "params": {
            "parameters": {"resource": "folder", "operation": "getById"},
            "items": [{"parameters": {"folderId": "f-1"}}],
            "credentials": {"autentiqueApi": {"apiToken": fixtures::TEST_API_TOKEN}}
        }}),
        json!({"id": 3, "method": "execute", "params": {
            "parameters": {"resource": "folder", "operation": "getById"},
            "items": [{"parameters": {"folderId": ""}}],
            "credentials": {"autentiqueApi": {"apiToken": fixtures::TEST_API_TOKEN}},
            "continueOnFail": true
        }}),
        json!({"id": 4, "method": "health"}),
    ];
    let responses = tokio::task::spawn_blocking(move || run_node(&requests))
        .await
        .expect("join");

    assert_eq!(responses[0]["result"]["status"], "configured");

    let records = &responses[1]["result"][0];
    assert_eq!(records[0]["json"], json!({"id": "f-1", "name": "Contracts"}));
    assert_eq!(records[0]["pairedItem"], 0);

    let failed = &responses[2]["result"][0][0];
    assert_eq!(failed["json"], json!({}));
    assert_eq!(failed["error"]["message"], "Folder ID is required");

    assert_eq!(responses[3]["result"]["metrics"]["requests_total"], 1);
    mock.assert_request_count(1).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn credential_test_reports_failure_without_raising() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_status(401, "Unauthorized").await;

    let requests = vec![
        json!({"id": 1, "method": "configure", "params": {"api_url": mock.endpoint()}}),
        json!({"id": 2, "method": "test_credentials", "params": {
            "credentials": {"apiToken": "wrong"}
        }}),
    ];
    let responses = tokio::task::spawn_blocking(move || run_node(&requests))
        .await
        .expect("join");

    assert_eq!(responses[1]["result"]["status"], "Error");
    assert!(responses[1].get("error").is_none());
}
