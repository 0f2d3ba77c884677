//! Integration tests for the mutation executor: create/update/delete with
//! the shared retry policy.

use std::time::Duration;

use gluapi::{
    Create, Delete, GlueClient, GlueError, Organization, OrganizationParams, RetryPolicy, Update,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(server: &MockServer) -> GlueClient {
    GlueClient::new("test-key", &server.uri())
        .unwrap()
        .with_policy(RetryPolicy {
            rate_limit_backoff: Duration::from_millis(5),
            rate_limit_attempts: 3,
            timeout_retries: 2,
            ..Default::default()
        })
}

fn org_body(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "data": {
            "id": id,
            "type": "organizations",
            "attributes": {"name": name}
        }
    })
}

#[tokio::test]
async fn test_create_wraps_attributes_in_the_wire_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations"))
        .and(body_json(serde_json::json!({
            "data": {
                "type": "organizations",
                "attributes": {"name": "Acme Corp", "organization-type-id": 7}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(org_body(99, "Acme Corp")))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let created = Organization::create(
        &client,
        &OrganizationParams {
            name: Some("Acme Corp".to_string()),
            organization_type_id: Some(7),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(created.id, "99");
    assert_eq!(created.attributes.name, "Acme Corp");
}

#[tokio::test]
async fn test_update_patches_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/organizations/99"))
        .and(body_json(serde_json::json!({
            "data": {
                "type": "organizations",
                "attributes": {"name": "Acme Corp (renamed)"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_body(99, "Acme Corp (renamed)")))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let updated = Organization::update(
        &client,
        "99",
        &OrganizationParams {
            name: Some("Acme Corp (renamed)".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.attributes.name, "Acme Corp (renamed)");
}

#[tokio::test]
async fn test_delete_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/99"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    Organization::delete(&client, "99").await.unwrap();
}

#[tokio::test]
async fn test_mutation_retries_through_rate_limiting() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(org_body(99, "Acme")))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let created = Organization::create(
        &client,
        &OrganizationParams {
            name: Some("Acme".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(created.id, "99");
}

#[tokio::test]
async fn test_mutation_timeout_is_terminal_after_the_retry_budget() {
    let server = MockServer::start().await;

    // No page size to degrade for a mutation: the timeout surfaces after
    // exactly the retry budget.
    Mock::given(method("POST"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(504).set_body_json(serde_json::json!({
            "errors": [{"detail": "The request took too long to process and timed out."}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let err = Organization::create(
        &client,
        &OrganizationParams {
            name: Some("Acme".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    match err {
        GlueError::Unexpected { detail, .. } => {
            assert!(detail.unwrap_or_default().contains("timed out"));
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mutation_rejection_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "errors": [{"title": "Unprocessable Entity", "detail": "name has already been taken"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fast_client(&server);
    let err = Organization::create(
        &client,
        &OrganizationParams {
            name: Some("Acme".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    match err {
        GlueError::Unexpected {
            status_code: Some(422),
            detail,
            ..
        } => assert_eq!(detail.as_deref(), Some("name has already been taken")),
        other => panic!("expected Unexpected, got {other:?}"),
    }
}
