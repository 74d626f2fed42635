//! End-to-end protocol tests over real TCP connections.

use serde_json::{json, Value};

use cjtp_server::config::ServerConfig;

mod common;
use common::{request, start_server, start_server_with, status_class, CjtpClient};

#[tokio::test]
async fn missing_fields_are_reported_together() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    client.send_raw("{}").await;
    let response = client.read_response().await;

    assert_eq!(
        response["status"],
        "4 missing method, missing path, missing date"
    );
    assert!(response.get("body").is_none());
}

#[tokio::test]
async fn echo_round_trips_body_bytes() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let body = "definitely not json }{";
    let response = client.roundtrip(&request("echo", "/test", Some(body))).await;

    assert_eq!(response["status"], "1 Ok");
    assert_eq!(response["body"], body);
}

#[tokio::test]
async fn malformed_trailing_segment_is_class_4_never_5() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    for path in ["/api/categories/abc", "/api/categories/12x", "/api/categories/-1"] {
        let response = client.roundtrip(&request("read", path, None)).await;
        assert_eq!(status_class(&response), '4', "path: {path}");
    }
}

#[tokio::test]
async fn read_is_idempotent() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let first = client
        .roundtrip(&request("read", "/api/categories/1", None))
        .await;
    let second = client
        .roundtrip(&request("read", "/api/categories/1", None))
        .await;

    assert_eq!(first["status"], "1 Ok");
    assert_eq!(first, second);
}

#[tokio::test]
async fn create_then_read_round_trip() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let created = client
        .roundtrip(&request(
            "create",
            "/api/categories",
            Some(r#"{"name":"Seafood"}"#),
        ))
        .await;
    assert_eq!(status_class(&created), '2');

    let record: Value = serde_json::from_str(created["body"].as_str().unwrap()).unwrap();
    let cid = record["cid"].as_u64().expect("cid is an integer");
    assert_eq!(record["name"], "Seafood");

    let read = client
        .roundtrip(&request("read", &format!("/api/categories/{cid}"), None))
        .await;
    assert_eq!(status_class(&read), '1');
    let read_record: Value = serde_json::from_str(read["body"].as_str().unwrap()).unwrap();
    assert_eq!(read_record["name"], "Seafood");
}

#[tokio::test]
async fn update_delete_read_scenario_on_id_3() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let updated = client
        .roundtrip(&request(
            "update",
            "/api/categories/3",
            Some(r#"{"name":"Test"}"#),
        ))
        .await;
    assert_eq!(updated, json!({"status": "3 Updated"}));

    let deleted = client
        .roundtrip(&request("delete", "/api/categories/3", None))
        .await;
    assert_eq!(deleted, json!({"status": "1 Ok"}));

    let read = client
        .roundtrip(&request("read", "/api/categories/3", None))
        .await;
    assert_eq!(status_class(&read), '5');
}

#[tokio::test]
async fn concurrent_creates_assign_distinct_ids() {
    let server = start_server().await;
    let clients = 8;

    let mut handles = Vec::new();
    for i in 0..clients {
        let addr = server.addr;
        handles.push(tokio::spawn(async move {
            let mut client = CjtpClient::connect(addr).await;
            let body = format!(r#"{{"name":"Category {i}"}}"#);
            let response = client
                .roundtrip(&request("create", "/api/categories", Some(&body)))
                .await;
            assert_eq!(status_class(&response), '2');
            let record: Value =
                serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
            record["cid"].as_u64().unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), clients, "every create got its own id");

    let mut client = CjtpClient::connect(server.addr).await;
    let all = client
        .roundtrip(&request("read", "/api/categories", None))
        .await;
    let categories: Vec<Value> =
        serde_json::from_str(all["body"].as_str().unwrap()).unwrap();
    assert_eq!(categories.len(), 3 + clients);
}

#[tokio::test]
async fn bad_request_does_not_close_the_connection() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    client.send_raw("this is not json").await;
    let rejected = client.read_response().await;
    assert_eq!(rejected["status"], "4 Bad Request");

    // Same connection, next cycle.
    let ok = client
        .roundtrip(&request("read", "/api/categories", None))
        .await;
    assert_eq!(status_class(&ok), '1');
}

#[tokio::test]
async fn unsupported_path_is_not_found() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let response = client
        .roundtrip(&request("read", "/api/products", None))
        .await;
    assert_eq!(response["status"], "5 Not Found");
}

#[tokio::test]
async fn validation_rejects_illegal_method_and_date() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let response = client
        .roundtrip(&request("patch", "/api/categories", None))
        .await;
    assert_eq!(response["status"], "4 illegal method");

    let mut bad_date = request("read", "/api/categories", None);
    bad_date["date"] = Value::String("tomorrow".to_string());
    let response = client.roundtrip(&bad_date).await;
    assert_eq!(response["status"], "4 illegal date");
}

#[tokio::test]
async fn burst_client_without_delimiter_is_served() {
    let mut config = ServerConfig::default();
    config.timeouts.read_idle_ms = 200;
    let server = start_server_with(config).await;
    let mut client = CjtpClient::connect(server.addr).await;

    // No trailing newline: the read-inactivity timeout flushes the
    // buffered burst as one frame.
    client
        .send_undelimited(&request("read", "/api/categories/2", None).to_string())
        .await;
    let response = client.read_response().await;
    assert_eq!(response["status"], "1 Ok");

    let record: Value = serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    assert_eq!(record["name"], "Condiments");
}

#[tokio::test]
async fn create_with_id_segment_is_rejected() {
    let server = start_server().await;
    let mut client = CjtpClient::connect(server.addr).await;

    let response = client
        .roundtrip(&request(
            "create",
            "/api/categories/7",
            Some(r#"{"name":"Seafood"}"#),
        ))
        .await;
    assert_eq!(response["status"], "4 Bad Request");
}
