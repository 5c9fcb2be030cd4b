/// Integration tests for the FocusFlow API
///
/// These drive the assembled router end-to-end for every path that
/// resolves before storage:
/// - the bearer-token wall on protected routes (missing, malformed,
///   garbage, and expired tokens all produce a uniform 401 envelope)
/// - request validation on the public endpoints
/// - routing and the liveness probe
///
/// Flows that require persisted rows (full register/login/task lifecycle,
/// cross-user isolation) run against a live database; the query layer
/// enforces isolation structurally by filtering every statement on
/// `owner_id`.
mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Duration;
use common::{test_app, TEST_SECRET};
use focusflow_shared::auth::jwt::{create_token, Claims};
use serde_json::{json, Value};
use tower::Service as _;
use uuid::Uuid;

/// Sends a request through a fresh router and returns (status, body JSON)
async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let mut app = test_app();
    let response = app.call(request).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_liveness_probe() {
    let (status, body) = send(get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("API working".to_string()));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = send(get("/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tasks_require_token() {
    let (status, body) = send(get("/api/tasks")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Not authorized, token missing"));
}

#[tokio::test]
async fn test_me_requires_token() {
    let (status, body) = send(get("/api/user/me")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Expected Bearer token"));
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks")
        .header(header::AUTHORIZATION, "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Token invalid or expired"));
}

#[tokio::test]
async fn test_expired_token_rejected() {
    // Signed with the right secret but one hour past expiry
    let claims = Claims::with_expiration(Uuid::new_v4(), Duration::hours(-1));
    let token = create_token(&claims, TEST_SECRET).unwrap();

    let request = Request::builder()
        .method("GET")
        .uri("/api/tasks")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Token invalid or expired"));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let claims = Claims::new(Uuid::new_v4());
    let token = create_token(&claims, "a-completely-different-signing-secret").unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/tasks/{}", Uuid::new_v4()))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Token invalid or expired"));
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let request = post_json(
        "/api/user/register",
        json!({
            "name": "Alice",
            "email": "not-an-email",
            "password": "password1"
        }),
    );

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Invalid email"));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let request = post_json(
        "/api/user/register",
        json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "short"
        }),
    );

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Password must be at least 8 characters")
    );
}

#[tokio::test]
async fn test_register_rejects_empty_name() {
    let request = post_json(
        "/api/user/register",
        json!({
            "name": "",
            "email": "alice@example.com",
            "password": "password1"
        }),
    );

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    let request = post_json(
        "/api/user/login",
        json!({ "email": "", "password": "" }),
    );

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Email and password are required"));
}
