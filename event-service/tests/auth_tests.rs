mod common;

use auth::Authenticator;
use auth::Claims;
use chrono::Utc;
use common::TestApp;
use common::JWT_ISSUER;
use common::JWT_SECRET;
use reqwest::StatusCode;
use serde_json::Value;

async fn assert_unauthorized(response: reqwest::Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = TestApp::spawn().await;

    for path in ["/categories", "/events", "/categories/1", "/events/1"] {
        let response = app
            .api_client
            .get(app.url(path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_unauthorized(response).await;
    }
}

#[tokio::test]
async fn test_non_bearer_scheme() {
    let app = TestApp::spawn().await;
    let token = app.token_for(1);

    let response = app
        .api_client
        .get(app.url("/categories"))
        .header("Authorization", format!("Token {}", token))
        .send()
        .await
        .unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_token_signed_with_other_key() {
    let app = TestApp::spawn().await;
    let other = Authenticator::new(b"another-secret-key-that-is-32-bytes-long!", JWT_ISSUER);
    let claims = Claims::for_user(1, "alice", "alice@example.com", JWT_ISSUER, 24);
    let token = other.generate_token(&claims).unwrap();

    let response = app.get_authenticated("/events", &token).send().await.unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_token_from_other_issuer() {
    let app = TestApp::spawn().await;
    let other = Authenticator::new(JWT_SECRET, "someone-else");
    let claims = Claims::for_user(1, "alice", "alice@example.com", "someone-else", 24);
    let token = other.generate_token(&claims).unwrap();

    let response = app.get_authenticated("/events", &token).send().await.unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_expired_token() {
    let app = TestApp::spawn().await;
    let hour_ago = Utc::now().timestamp() - 3600;
    let claims = Claims::for_user(1, "alice", "alice@example.com", JWT_ISSUER, 24)
        .with_issued_at(hour_ago - 60)
        .with_expiration(hour_ago);
    let token = app.sign(&claims);

    let response = app.get_authenticated("/events", &token).send().await.unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_token_without_user_group() {
    let app = TestApp::spawn().await;
    let mut claims = Claims::for_user(1, "alice", "alice@example.com", JWT_ISSUER, 24);
    claims.groups.clear();
    let token = app.sign(&claims);

    let response = app
        .get_authenticated("/categories", &token)
        .send()
        .await
        .unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_token_with_non_numeric_user_id() {
    let app = TestApp::spawn().await;
    let claims = Claims::for_user(1, "alice", "alice@example.com", JWT_ISSUER, 24)
        .with_user_id("alice");
    let token = app.sign(&claims);

    let response = app
        .get_authenticated("/categories", &token)
        .send()
        .await
        .unwrap();

    assert_unauthorized(response).await;
}

#[tokio::test]
async fn test_identity_falls_back_to_subject() {
    let app = TestApp::spawn().await;
    let mut claims = Claims::for_user(5, "eve", "eve@example.com", JWT_ISSUER, 24);
    claims.user_id = None;
    let token = app.sign(&claims);

    let category_id = app.create_category(&token, "Work", "#f00").await;

    // Same account via the explicit claim sees the category
    let response = app
        .get_authenticated(&format!("/categories/{}", category_id), &app.token_for(5))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
