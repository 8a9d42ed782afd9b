//! Registry client tests
//!
//! The client is exercised against a wiremock endpoint to check the exact
//! requests it sends and how it maps responses.

use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use youth_registry::config::RegistryConfig;
use youth_registry::services::{RegistryClient, RegistryClientError, RegistryEndpoint};

use crate::common::sample_fields;

const ENDPOINT_PATH: &str = "/api/youth-registry";

fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::new(&RegistryConfig {
        endpoint_url: format!("{}{}", server.uri(), ENDPOINT_PATH),
    })
    .expect("Client builds")
}

async fn last_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("Recording enabled");
    let request = requests.last().expect("A request was sent");
    serde_json::from_slice(&request.body).expect("Body is JSON")
}

#[tokio::test]
async fn test_list_decodes_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "number": 1,
                "municipality": "Тестовый район",
                "educational_institution": "Школа №1",
                "organization_name": "Юнармия",
                "contact_details": "ул. Мира, 5",
                "participants_count": 30,
                "activity_direction": "Спорт",
                "local_act_details": "Приказ №1",
                "website_url": null,
                "created_at": "2024-03-01T10:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server).list().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, Some(2));
    assert_eq!(records[0].fields.organization_name, "Юнармия");
    assert_eq!(records[0].fields.website_url, "");
}

#[tokio::test]
async fn test_list_tolerates_naive_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "number": 1,
                "municipality": "Тестовый район",
                "educational_institution": "Школа №1",
                "organization_name": "Юнармия",
                "contact_details": "ул. Мира, 5",
                "participants_count": 30,
                "activity_direction": "Спорт",
                "local_act_details": "Приказ №1",
                "website_url": "",
                "created_at": "2024-03-01 10:00:00.123456",
                "updated_at": "2024-03-02 08:30:00"
            },
            {
                "id": 2,
                "number": 2,
                "municipality": "Тестовый район",
                "educational_institution": "Школа №2",
                "organization_name": "Эколята",
                "contact_details": "ул. Садовая, 1",
                "participants_count": 12,
                "activity_direction": "Экология",
                "local_act_details": "Приказ №2",
                "website_url": null,
                "created_at": "not a date",
                "updated_at": null
            }
        ])))
        .mount(&server)
        .await;

    let records = assert_ok!(client_for(&server).list().await);

    assert_eq!(records.len(), 2);
    assert!(records[0].created_at.is_some());
    assert!(records[0].updated_at.is_some());
    assert_eq!(records[1].fields.organization_name, "Эколята");
    assert_eq!(records[1].created_at, None);
}

#[tokio::test]
async fn test_list_rejects_non_collection_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "oops"})))
        .mount(&server)
        .await;

    let err = client_for(&server).list().await.unwrap_err();

    assert!(matches!(err, RegistryClientError::Decode(_)));
}

#[tokio::test]
async fn test_create_posts_fields_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client_for(&server).create(&sample_fields()).await);

    let body = last_body(&server).await;
    assert!(body.get("id").is_none());
    assert_eq!(body, serde_json::to_value(sample_fields()).unwrap());
}

#[tokio::test]
async fn test_update_puts_id_and_all_fields() {
    let server = MockServer::start().await;
    let mut expected = serde_json::to_value(sample_fields()).unwrap();
    expected["id"] = json!(7);

    Mock::given(method("PUT"))
        .and(path(ENDPOINT_PATH))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client_for(&server).update(7, &sample_fields()).await);
}

#[tokio::test]
async fn test_delete_sends_id_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(ENDPOINT_PATH))
        .and(query_param("id", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(client_for(&server).delete(3).await);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.update(9, &sample_fields()).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));

    let err = client.delete(9).await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    // Bind then release a port so nothing listens on it
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RegistryClient::new(&RegistryConfig {
        endpoint_url: format!("http://{}{}", addr, ENDPOINT_PATH),
    })
    .unwrap();

    let err = assert_err!(client.list().await);

    assert!(matches!(err, RegistryClientError::Transport(_)));
    assert_eq!(err.status(), None);
}
