//! End-to-end tests for the REST API
//!
//! Status codes and wire format are checked with raw reqwest requests so the
//! assertions do not depend on the client's error mapping.

use gateway_api::{create_router, AppState};
use gateway_client::testing::TestServer;
use gateway_core::Storage;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn start_server() -> TestServer {
    let state = AppState::new(Storage::in_memory());
    TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server")
}

fn url(server: &TestServer, path: &str) -> String {
    format!("{}{}", server.base_url(), path)
}

async fn post(server: &TestServer, path: &str, body: Value) -> reqwest::Response {
    server
        .client
        .http_client()
        .post(url(server, path))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn put(server: &TestServer, path: &str, body: Option<Value>) -> reqwest::Response {
    let request = server.client.http_client().put(url(server, path));
    let request = match body {
        Some(body) => request.json(&body),
        None => request,
    };
    request.send().await.unwrap()
}

async fn get(server: &TestServer, path: &str) -> reqwest::Response {
    server
        .client
        .http_client()
        .get(url(server, path))
        .send()
        .await
        .unwrap()
}

async fn delete(server: &TestServer, path: &str) -> reqwest::Response {
    server
        .client
        .http_client()
        .delete(url(server, path))
        .send()
        .await
        .unwrap()
}

fn gateway_body(serial: &str, ip: &str) -> Value {
    json!({
        "serialNumber": serial,
        "humanReadableName": format!("{} office", serial),
        "ipv4Address": ip
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = start_server().await;
    let response = get(&server, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_create_gateway_wire_format() {
    let server = start_server().await;

    let response = post(
        &server,
        "/api/v1/gateways",
        json!({
            "serialNumber": "RECM12345M8C",
            "humanReadableName": "Admon RRHH",
            "ipv4Address": "192.168.10.254",
            "peripheralDevices": [
                { "uid": 20013, "vendor": "ASUS", "dateCreated": "2020-01-11", "statusPd": true }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "serialNumber": "RECM12345M8C",
            "humanReadableName": "Admon RRHH",
            "ipv4Address": "192.168.10.254",
            "peripherals": [
                { "uid": 20013, "vendor": "ASUS", "dateCreated": "2020-01-11", "status": true }
            ]
        })
    );
}

#[tokio::test]
async fn test_error_body_and_status_mapping() {
    let server = start_server().await;
    assert_eq!(
        post(&server, "/api/v1/gateways", gateway_body("GW-1", "10.0.0.1"))
            .await
            .status(),
        StatusCode::OK
    );

    // 409 duplicate serial
    let response = post(&server, "/api/v1/gateways", gateway_body("GW-1", "10.0.0.9")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "error": "conflict",
            "message": "Gateway with serial number : 'GW-1', already exists."
        })
    );

    // 409 duplicate address
    let response = post(&server, "/api/v1/gateways", gateway_body("GW-2", "10.0.0.1")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 406 invalid address
    let response = post(&server, "/api/v1/gateways", gateway_body("GW-2", "10.0.0")).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Gateway not valid with Ipv4 Address : '10.0.0'");

    // 404 unknown gateway
    let response = get(&server, "/api/v1/gateways/NOPE").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    // 406 blank peripheral
    let response = post(&server, "/api/v1/peripherals", json!({ "uid": 5 })).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Action Create is not possible in Peripheral device . Review the introduced data."
    );
}

#[tokio::test]
async fn test_capacity_and_ownership_statuses() {
    let server = start_server().await;
    post(&server, "/api/v1/gateways", gateway_body("GW-A", "10.0.0.1")).await;
    post(&server, "/api/v1/gateways", gateway_body("GW-B", "10.0.0.2")).await;

    for uid in 1..=10 {
        let response = post(
            &server,
            "/api/v1/gateways/GW-A/peripherals",
            json!({ "uid": uid, "vendor": "ACME" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "attach {}", uid);
    }

    let response = post(
        &server,
        "/api/v1/gateways/GW-A/peripherals",
        json!({ "uid": 11, "vendor": "ACME" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    // 424 when deleting through a gateway that does not own it
    let response = delete(&server, "/api/v1/gateways/GW-B/peripherals/1").await;
    assert_eq!(response.status(), StatusCode::FAILED_DEPENDENCY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "failed_dependency");

    // 404 for an unknown gateway or uid
    let response = delete(&server, "/api/v1/gateways/GW-C/peripherals/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete(&server, "/api/v1/gateways/GW-A/peripherals/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not_found");

    // Associate returns 200 with no body
    let response = put(&server, "/api/v1/gateways/GW-B/peripherals/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().is_empty());

    let response = delete(&server, "/api/v1/gateways/GW-B/peripherals/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().is_empty());

    let response = get(&server, "/api/v1/peripherals/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_gateway_uses_path_serial() {
    let server = start_server().await;
    post(&server, "/api/v1/gateways", gateway_body("GW-1", "10.0.0.1")).await;

    let response = put(
        &server,
        "/api/v1/gateways/GW-1",
        Some(json!({
            "serialNumber": "SOMETHING-ELSE",
            "humanReadableName": "Renamed",
            "ipv4Address": "10.0.0.5"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["serialNumber"], "GW-1");
    assert_eq!(body["ipv4Address"], "10.0.0.5");

    // Same address again is a conflict
    let response = put(&server, "/api/v1/gateways/GW-1", Some(gateway_body("GW-1", "10.0.0.5"))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_peripheral_routes() {
    let server = start_server().await;
    post(
        &server,
        "/api/v1/gateways",
        json!({
            "serialNumber": "GW-1",
            "humanReadableName": "One",
            "ipv4Address": "10.0.0.1",
            "peripherals": [{ "uid": 1, "vendor": "HP" }]
        }),
    )
    .await;
    let response = post(
        &server,
        "/api/v1/peripherals",
        json!({ "uid": 2, "vendor": "Dell", "dateCreated": "2021-03-04" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = get(&server, "/api/v1/peripherals/associates/true")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!([{ "uid": 1, "vendor": "HP", "dateCreated": null, "status": false }]));

    let body: Value = get(&server, "/api/v1/peripherals/associates/false")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body[0]["uid"], 2);

    let response = put(
        &server,
        "/api/v1/peripherals/2",
        Some(json!({ "vendor": "Lenovo", "status": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "uid": 2, "vendor": "Lenovo", "dateCreated": "2021-03-04", "status": true })
    );

    let response = delete(&server, "/api/v1/peripherals/2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete(&server, "/api/v1/peripherals/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_gateway_releases_peripherals() {
    let server = start_server().await;
    post(
        &server,
        "/api/v1/gateways",
        json!({
            "serialNumber": "GW-1",
            "humanReadableName": "One",
            "ipv4Address": "10.0.0.1",
            "peripherals": [{ "uid": 1, "vendor": "HP" }, { "uid": 2, "vendor": "HP" }]
        }),
    )
    .await;

    let response = delete(&server, "/api/v1/gateways/GW-1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().is_empty());

    let body: Value = get(&server, "/api/v1/peripherals/associates/false")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let response = delete(&server, "/api/v1/gateways/GW-1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_requests_rejected_by_extractors() {
    let server = start_server().await;

    let response = get(&server, "/api/v1/peripherals/not-a-number").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&server, "/api/v1/peripherals/associates/maybe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .client
        .http_client()
        .post(url(&server, "/api/v1/gateways"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post(&server, "/api/v1/peripherals", json!({ "uid": "seven" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
