//! API integration tests
//!
//! Tests the registry endpoint through the full router (CORS and tracing
//! layers included) against a real SQLite file.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};

use crate::common::{body_with, sample_body, OrganizationFactory, TestApp, BASE_PATH};

fn by_id(id: i64) -> String {
    format!("{}?id={}", BASE_PATH, id)
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let app = TestApp::new().await;
    let response = app.get("/api/health").await;

    response.assert_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_detailed_health_endpoint() {
    let app = TestApp::new().await;
    let response = app.get("/api/health/detailed").await;

    response.assert_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["components"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_list_is_empty_initially() {
    let app = TestApp::new().await;
    let response = app.get(BASE_PATH).await;

    response.assert_ok();
    let json: Vec<Value> = response.json();
    assert!(json.is_empty());
}

#[tokio::test]
async fn test_create_returns_created_record() {
    let app = TestApp::new().await;
    let response = app.post_json(BASE_PATH, sample_body()).await;

    response.assert_created();

    let json: Value = response.json();
    assert!(json["id"].as_i64().is_some());
    assert_eq!(json["organization_name"], "Юнармия");
    assert_eq!(json["contact_details"], "ул. Мира, 5\nтел. 8 (800) 000-00-00");
    assert_eq!(json["website_url"], "https://school1.example.ru/yunarmia");
}

#[tokio::test]
async fn test_create_ignores_client_supplied_id() {
    let app = TestApp::new().await;
    let mut body = sample_body();
    body["id"] = json!(999);

    let id = app.create(body).await;

    assert_ne!(id, 999);
}

#[tokio::test]
async fn test_create_without_website_stores_empty_string() {
    let app = TestApp::new().await;
    let factory = OrganizationFactory::new();

    let mut body = factory.create().json();
    body.as_object_mut().unwrap().remove("website_url");
    let id = app.create(body).await;

    let json: Value = app.get(&by_id(id)).await.json();
    assert_eq!(json["website_url"], "");

    let mut body = factory.create().json();
    body["website_url"] = Value::Null;
    let id = app.create(body).await;

    let json: Value = app.get(&by_id(id)).await.json();
    assert_eq!(json["website_url"], "");
}

#[tokio::test]
async fn test_list_is_ordered_by_number() {
    let app = TestApp::new().await;
    app.create(body_with(3, "Третья")).await;
    app.create(body_with(1, "Первая")).await;
    app.create(body_with(2, "Вторая")).await;

    let json: Vec<Value> = app.get(BASE_PATH).await.json();
    let names: Vec<&str> = json
        .iter()
        .map(|org| org["organization_name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Первая", "Вторая", "Третья"]);
}

#[tokio::test]
async fn test_get_by_id() {
    let app = TestApp::new().await;
    let id = app.create(sample_body()).await;

    let response = app.get(&by_id(id)).await;
    response.assert_ok();

    let json: Value = response.json();
    assert_eq!(json["id"], id);
    assert_eq!(json["number"], 1);
}

#[tokio::test]
async fn test_get_unknown_id_returns_not_found() {
    let app = TestApp::new().await;
    let response = app.get(&by_id(42)).await;

    response.assert_not_found();
    let json: Value = response.json();
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_get_with_non_numeric_id_is_bad_request() {
    let app = TestApp::new().await;
    app.get(&format!("{}?id=abc", BASE_PATH))
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn test_create_rejects_blank_required_field() {
    let app = TestApp::new().await;
    let mut body = sample_body();
    body["municipality"] = json!("   ");

    let response = app.post_json(BASE_PATH, body).await;

    response.assert_unprocessable();
    let json: Value = response.json();
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_create_rejects_missing_field() {
    let app = TestApp::new().await;
    let mut body = sample_body();
    body.as_object_mut().unwrap().remove("number");

    app.post_json(BASE_PATH, body).await.assert_unprocessable();
}

#[tokio::test]
async fn test_create_rejects_negative_participants() {
    let app = TestApp::new().await;
    let body = OrganizationFactory::new()
        .create()
        .with_participants(-1)
        .json();

    app.post_json(BASE_PATH, body).await.assert_unprocessable();
}

#[tokio::test]
async fn test_create_rejects_relative_website() {
    let app = TestApp::new().await;
    let mut body = sample_body();
    body["website_url"] = json!("school1.example.ru");

    app.post_json(BASE_PATH, body).await.assert_unprocessable();
}

#[tokio::test]
async fn test_create_accepts_any_absolute_website() {
    let app = TestApp::new().await;

    for url in ["ftp://example.org/club", "mailto:club@school.ru"] {
        let mut body = sample_body();
        body["website_url"] = json!(url);

        let response = app.post_json(BASE_PATH, body).await;
        response.assert_created();
        let json: Value = response.json();
        assert_eq!(json["website_url"], url);
    }
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = TestApp::new().await;
    app.send_json("POST", BASE_PATH, "{not json".to_string())
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let app = TestApp::new().await;
    let id = app.create(sample_body()).await;

    let mut body = body_with(5, "Движение первых");
    body["id"] = json!(id);
    body["website_url"] = json!("");

    let response = app.put_json(BASE_PATH, body).await;
    response.assert_ok();

    let json: Value = app.get(&by_id(id)).await.json();
    assert_eq!(json["number"], 5);
    assert_eq!(json["organization_name"], "Движение первых");
    assert_eq!(json["website_url"], "");
}

#[tokio::test]
async fn test_update_without_id_is_bad_request() {
    let app = TestApp::new().await;
    app.create(sample_body()).await;

    let response = app.put_json(BASE_PATH, sample_body()).await;

    response.assert_bad_request();
    let json: Value = response.json();
    assert_eq!(json["message"], "ID is required");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let app = TestApp::new().await;
    let mut body = sample_body();
    body["id"] = json!(404);

    app.put_json(BASE_PATH, body).await.assert_not_found();
}

#[tokio::test]
async fn test_last_write_wins() {
    let app = TestApp::new().await;
    let id = app.create(sample_body()).await;

    for name in ["Первый редактор", "Второй редактор"] {
        let mut body = body_with(1, name);
        body["id"] = json!(id);
        app.put_json(BASE_PATH, body).await.assert_ok();
    }

    let json: Value = app.get(&by_id(id)).await.json();
    assert_eq!(json["organization_name"], "Второй редактор");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let app = TestApp::new().await;
    let id = app.create(sample_body()).await;

    let response = app.delete(&by_id(id)).await;
    response.assert_ok();
    let json: Value = response.json();
    assert!(json["message"].as_str().is_some());

    app.get(&by_id(id)).await.assert_not_found();
    let list: Vec<Value> = app.get(BASE_PATH).await.json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn test_delete_without_id_is_bad_request() {
    let app = TestApp::new().await;
    app.delete(BASE_PATH).await.assert_bad_request();
    app.delete(&format!("{}?id=", BASE_PATH))
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let app = TestApp::new().await;
    app.delete(&by_id(7)).await.assert_not_found();
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Request::builder()
                .method("PATCH")
                .uri(BASE_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Request::builder()
                .method("OPTIONS")
                .uri(BASE_PATH)
                .header("Origin", "http://admin.example.ru")
                .header("Access-Control-Request-Method", "DELETE")
                .header("Access-Control-Request-Headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert!(response.status.is_success());
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
    assert_eq!(
        response.header("access-control-max-age").as_deref(),
        Some("86400")
    );
    let methods = response
        .header("access-control-allow-methods")
        .unwrap_or_default();
    assert!(methods.contains("DELETE"));
    assert!(methods.contains("PUT"));
}

#[tokio::test]
async fn test_cors_header_on_simple_request() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Request::builder()
                .method("GET")
                .uri(BASE_PATH)
                .header("Origin", "http://admin.example.ru")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    response.assert_ok();
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}
