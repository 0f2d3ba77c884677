//! Integration tests for authentication: API-key headers and the two-step
//! username/password token exchange.

use gluapi::{AuthFailure, Credential, Get, GlueClient, GlueError, Organization};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn org_body(id: u64) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "id": id,
            "type": "organizations",
            "attributes": {"name": format!("Org {id}")}
        }
    })
}

#[tokio::test]
async fn test_api_key_and_content_type_on_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/42"))
        .and(header("x-api-key", "key-123"))
        .and(header("content-type", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_body(42)))
        .expect(1)
        .mount(&server)
        .await;

    let client = GlueClient::new("key-123", &server.uri()).unwrap();
    let org = Organization::get(&client, "42").await.unwrap();

    assert_eq!(org.attributes.name, "Org 42");
}

#[tokio::test]
async fn test_token_exchange_then_bearer_on_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "username": "user@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "refresh_token": "refresh-abc"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/access_token"))
        .and(header("authorization", "Bearer refresh-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "access-xyz"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/organizations/42"))
        .and(header("authorization", "Bearer access-xyz"))
        .and(header("content-type", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_body(42)))
        .expect(1)
        .mount(&server)
        .await;

    let client = GlueClient::login(
        Credential::UserPassword {
            username: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        },
        &server.uri(),
    )
    .await
    .unwrap();

    let org = Organization::get(&client, "42").await.unwrap();
    assert_eq!(org.id, "42");
}

#[tokio::test]
async fn test_login_rejection_is_refresh_token_denied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = GlueClient::login(
        Credential::UserPassword {
            username: "user@example.com".to_string(),
            password: "wrong".to_string(),
        },
        &server.uri(),
    )
    .await
    .unwrap_err();

    match err {
        GlueError::Auth(AuthFailure::RefreshTokenDenied { status }) => assert_eq!(status, 401),
        other => panic!("expected RefreshTokenDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_access_token_rejection_is_access_token_denied() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "refresh_token": "refresh-abc"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/access_token"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = GlueClient::login(
        Credential::UserPassword {
            username: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        },
        &server.uri(),
    )
    .await
    .unwrap_err();

    match err {
        GlueError::Auth(AuthFailure::AccessTokenDenied { status }) => assert_eq!(status, 403),
        other => panic!("expected AccessTokenDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_auth_failures_are_not_retried() {
    let server = MockServer::start().await;

    // expect(1): a second login attempt would fail verification on drop.
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = GlueClient::login(
        Credential::UserPassword {
            username: "user@example.com".to_string(),
            password: "hunter2".to_string(),
        },
        &server.uri(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        GlueError::Auth(AuthFailure::RefreshTokenDenied { status: 429 })
    ));
}
