/// API integration tests
/// Tests complete HTTP request/response cycles against the real router,
/// with the auth middleware and handler policy wiring in the path.
mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sqlx::{Pool, Sqlite};
use tower::util::ServiceExt;

use common::{register, test_pool, TEST_COST};
use courier::{
    api::{create_router, AppState},
    auth::TokenSigner,
    config::Config,
    db::MessageRepository,
};

/// Helper to create a test app router over an in-memory database.
async fn create_test_app() -> (Router, Arc<TokenSigner>, Pool<Sqlite>) {
    let pool = test_pool().await;

    let tokens = Arc::new(TokenSigner::new("test-secret-key"));
    let config = Arc::new(Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        secret_key: "test-secret-key".to_string(),
        bcrypt_cost: TEST_COST,
        db_max_connections: 1,
        db_min_connections: 1,
        request_timeout_secs: 30,
    });

    let state = AppState {
        db: pool.clone(),
        tokens: Arc::clone(&tokens),
        config,
    };

    (create_router(state), tokens, pool)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test protected routes without an Authorization header
#[tokio::test]
async fn test_missing_token_rejected_before_handlers() {
    let (app, _, _pool) = create_test_app().await;

    for uri in ["/users", "/users/alice", "/users/alice/to", "/messages/1"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

/// Test a tampered bearer token
#[tokio::test]
async fn test_tampered_token_rejected() {
    let (app, tokens, pool) = create_test_app().await;
    register(&pool, "alice", "secret1").await;

    let mut token = tokens.issue("alice").unwrap();
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let response = app.oneshot(get_with_token("/users", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Test register -> token -> protected route round trip
#[tokio::test]
async fn test_register_then_use_token() {
    let (app, _, _pool) = create_test_app().await;

    let body = serde_json::json!({
        "username": "alice",
        "password": "secret1",
        "first_name": "Alice",
        "last_name": "Ample",
        "phone": "+15550001111",
    });
    let response = app
        .clone()
        .oneshot(post_json("/auth/register", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    let token = json["token"].as_str().unwrap().to_string();

    let response = app.oneshot(get_with_token("/users", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Test login with wrong password
#[tokio::test]
async fn test_login_wrong_password() {
    let (app, _, pool) = create_test_app().await;
    register(&pool, "alice", "secret1").await;

    let body = serde_json::json!({
        "username": "alice",
        "password": "wrong",
    });
    let response = app
        .oneshot(post_json("/auth/login", &body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Test GET /messages/:id as a third user
#[tokio::test]
async fn test_message_detail_forbidden_for_third_party() {
    let (app, tokens, pool) = create_test_app().await;
    register(&pool, "alice", "pw").await;
    register(&pool, "bob", "pw").await;
    register(&pool, "carol", "pw").await;

    let msg = MessageRepository::create(&pool, "alice", "bob", "hello")
        .await
        .unwrap();
    let uri = format!("/messages/{}", msg.id);

    let carol = tokens.issue("carol").unwrap();
    let response = app
        .clone()
        .oneshot(get_with_token(&uri, &carol))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Either party still reads it fine.
    let bob = tokens.issue("bob").unwrap();
    let response = app.oneshot(get_with_token(&uri, &bob)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Test marking read over HTTP: recipient only
#[tokio::test]
async fn test_mark_read_recipient_only_over_http() {
    let (app, tokens, pool) = create_test_app().await;
    register(&pool, "alice", "pw").await;
    register(&pool, "bob", "pw").await;

    let msg = MessageRepository::create(&pool, "alice", "bob", "hello")
        .await
        .unwrap();
    let uri = format!("/messages/{}/read", msg.id);
    let none = serde_json::json!({});

    let alice = tokens.issue("alice").unwrap();
    let response = app
        .clone()
        .oneshot(post_json(&uri, &none, Some(&alice)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The refusal left the message unread.
    let detail = MessageRepository::get(&pool, msg.id).await.unwrap();
    assert_eq!(detail.read_at, None);

    let bob = tokens.issue("bob").unwrap();
    let response = app
        .oneshot(post_json(&uri, &none, Some(&bob)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["message"]["read_at"].is_i64());
}

/// Test GET /users/:username as the wrong user
#[tokio::test]
async fn test_user_routes_enforce_correct_user() {
    let (app, tokens, pool) = create_test_app().await;
    register(&pool, "alice", "pw").await;
    register(&pool, "bob", "pw").await;

    let bob = tokens.issue("bob").unwrap();
    for uri in ["/users/alice", "/users/alice/to", "/users/alice/from"] {
        let response = app.clone().oneshot(get_with_token(uri, &bob)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{}", uri);
    }

    let alice = tokens.issue("alice").unwrap();
    let response = app
        .oneshot(get_with_token("/users/alice", &alice))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// Test that a sent message's sender comes from the token, not the body
#[tokio::test]
async fn test_send_message_sender_is_verified_identity() {
    let (app, tokens, pool) = create_test_app().await;
    register(&pool, "alice", "pw").await;
    register(&pool, "bob", "pw").await;

    let alice = tokens.issue("alice").unwrap();
    let body = serde_json::json!({
        "to_username": "bob",
        "body": "hi",
    });
    let response = app
        .oneshot(post_json("/messages", &body, Some(&alice)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"]["from_username"], "alice");
    assert_eq!(json["message"]["to_username"], "bob");
    assert!(json["message"]["read_at"].is_null());
}
