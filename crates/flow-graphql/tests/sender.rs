//! Request sender tests against a mock GraphQL endpoint.

use flow_core::{NodeError, SecretString};
use flow_graphql::{
    BearerAuth, GraphqlClientError, GraphqlQuery, GraphqlRequest, GraphqlSender,
    GraphqlSenderBuilder, NoAuth, UploadFile, Variables,
};
use flow_testkit::{MockGraphqlServer, assert_api_error_contains, assert_transport_error, fixtures};
use serde_json::json;

fn request(query: &str) -> GraphqlRequest {
    let mut variables = Variables::new();
    variables.insert("limit".into(), json!(20));
    variables.insert("page".into(), json!(1));
    GraphqlRequest::new(GraphqlQuery::new(query), variables)
}

#[tokio::test]
async fn data_is_returned_unchanged() {
    flow_testkit::init_test_tracing();
    let mock = MockGraphqlServer::start().await;
    let data = fixtures::json::page("documents", json!([{"id": "d1", "name": "A"}]));
    mock.expect_data(data.clone()).await;

    let sender = GraphqlSender::new(mock.endpoint());
    let result = sender
        .send_json(request("query { documents { total } }"), &NoAuth)
        .await
        .unwrap();

    assert_eq!(result, data);
    let metrics = sender.metrics();
    assert_eq!(metrics.requests_total, 1);
    assert_eq!(metrics.requests_success, 1);
}

#[tokio::test]
async fn json_body_is_query_and_variables() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_data(json!({"ok": true})).await;

    GraphqlSender::new(mock.endpoint())
        .send_json(request("query { x }"), &NoAuth)
        .await
        .unwrap();

    let bodies = mock.received_json_bodies().await;
    assert_eq!(
        bodies,
        vec![json!({"query": "query { x }", "variables": {"limit": 20, "page": 1}})]
    );
    let requests = mock.received_requests().await;
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn graphql_errors_become_api_error() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_errors(fixtures::json::errors("x")).await;

    let sender = GraphqlSender::new(mock.endpoint());
    let err = sender
        .send_json(request("query { x }"), &NoAuth)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphqlClientError::GraphqlErrors { .. }));
    let node_err = NodeError::from(err);
    assert_api_error_contains(&node_err, "x");
    assert!(
        node_err
            .to_string()
            .starts_with("Error while sending request. Message: ")
    );
    assert_eq!(sender.metrics().requests_error, 1);
}

#[tokio::test]
async fn errors_without_message_keep_their_payload() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_errors(json!([{"code": "X"}])).await;

    let err = GraphqlSender::new(mock.endpoint())
        .send_json(request("query { x }"), &NoAuth)
        .await
        .unwrap_err();

    let node_err = NodeError::from(err);
    assert_api_error_contains(&node_err, "X");
    match node_err {
        NodeError::Api { errors, .. } => assert_eq!(errors, json!([{"code": "X"}])),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_status_becomes_transport_error() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_status(500, "Internal Server Error").await;

    let err = GraphqlSender::new(mock.endpoint())
        .send_json(request("query { x }"), &NoAuth)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    let node_err = NodeError::from(err);
    assert_transport_error(&node_err);
    assert!(node_err.to_string().contains("Internal Server Error"));
    mock.assert_request_count(1).await;
}

#[tokio::test]
async fn connection_failure_becomes_transport_error() {
    // Nothing listens on port 9 of localhost.
    let err = GraphqlSender::new("http://127.0.0.1:9/v2/graphql")
        .send_json(request("query { x }"), &NoAuth)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphqlClientError::Http(_)));
    assert_transport_error(&NodeError::from(err));
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_data_with_bearer("secret-token", json!({"me": {"id": "u1"}}))
        .await;

    let auth = BearerAuth::new(SecretString::new("secret-token"));
    let data = GraphqlSender::new(mock.endpoint())
        .send_json(request("query { me { id } }"), &auth)
        .await
        .unwrap();

    assert_eq!(data["me"]["id"], "u1");
}

#[tokio::test]
async fn user_agent_header_is_applied() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_data(json!({})).await;

    let sender = GraphqlSenderBuilder::new(mock.endpoint())
        .with_user_agent("flow-test/1.0")
        .build()
        .unwrap();
    sender
        .send_json(request("query { x }"), &NoAuth)
        .await
        .unwrap();

    let requests = mock.received_requests().await;
    assert_eq!(requests[0].headers.get("user-agent").unwrap(), "flow-test/1.0");
}

#[tokio::test]
async fn multipart_upload_has_three_fields() {
    let mock = MockGraphqlServer::start().await;
    mock.expect_data(fixtures::json::create_document_data("doc-1"))
        .await;

    let mut variables = Variables::new();
    variables.insert("document".into(), json!({"name": "Contract"}));
    variables.insert("signers".into(), fixtures::json::signers());
    let operations = GraphqlRequest::new(GraphqlQuery::new("mutation CreateDocumentMutation"), variables);
    let file = UploadFile::new(fixtures::PDF_BYTES.to_vec(), "contract.pdf", "application/pdf");

    let data = GraphqlSender::new(mock.endpoint())
        .send_with_file(operations, file, &NoAuth)
        .await
        .unwrap();
    assert_eq!(data["createDocument"]["id"], "doc-1");

    let requests = mock.received_requests().await;
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="operations""#));
    assert!(body.contains(r#""file":null"#));
    assert!(body.contains(r#"name="map""#));
    assert!(body.contains(r#"{"file":["variables.file"]}"#));
    assert!(body.contains(r#"name="file"; filename="contract.pdf""#));
    assert!(body.to_ascii_lowercase().contains("content-type: application/pdf"));
    assert!(body.contains("%PDF-1.4"));

    let operations_pos = body.find(r#"name="operations""#).unwrap();
    let map_pos = body.find(r#"name="map""#).unwrap();
    let file_pos = body.find(r#"name="file""#).unwrap();
    assert!(operations_pos < map_pos && map_pos < file_pos);
}
