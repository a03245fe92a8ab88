//! Router-level tests for the auth crate
//!
//! Drive `auth_router` end to end against the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::bootstrap::{AdminBootstrapConfig, AdminBootstrapper};
use crate::application::session_token::{SessionSecret, SessionTokenCodec};
use crate::infra::memory::InMemoryUserRepository;
use crate::presentation::middleware::AuthGate;
use crate::presentation::router::auth_router;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "changeme";

async fn app() -> Router {
    let repo = Arc::new(InMemoryUserRepository::new());
    AdminBootstrapper::new(
        repo.clone(),
        AdminBootstrapConfig::new(ADMIN_EMAIL, ADMIN_PASSWORD),
    )
    .run()
    .await
    .unwrap();

    let codec = SessionTokenCodec::new(
        SessionSecret::new(b"router-test-secret".to_vec()),
        Duration::from_secs(3600),
    );
    let gate = AuthGate::new(Arc::new(codec));
    auth_router(repo, &gate)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<Value>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = (!bytes.is_empty()).then(|| serde_json::from_slice(&bytes).unwrap());
    (status, body)
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Option<Value>) {
    send(
        app,
        json_request(
            Method::POST,
            "/login",
            None,
            json!({ "email": email, "password": password }),
        ),
    )
    .await
}

async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = login(app, email, password).await;
    assert_eq!(status, StatusCode::OK);
    body.unwrap()["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_login_response_shape() {
    let app = app().await;
    let (status, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);

    let body = body.unwrap();
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["username"], "Admin");
    assert_eq!(body["user"]["is_admin"], true);
    assert!(body["user"]["id"].is_i64());
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("created_at").is_some());
}

#[tokio::test]
async fn test_failed_logins_are_indistinguishable() {
    let app = app().await;
    let unknown = login(&app, "ghost@example.com", ADMIN_PASSWORD).await;
    let wrong = login(&app, ADMIN_EMAIL, "not-the-password").await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
    assert_eq!(wrong.1.unwrap()["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_create_user_requires_token() {
    let app = app().await;
    let req = json_request(
        Method::POST,
        "/users",
        None,
        json!({ "email": "new@example.com", "password": "Velvet-Harbor-42", "username": "New" }),
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_admin_creates_user_who_cannot_create_users() {
    let app = app().await;
    let admin = login_token(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let req = json_request(
        Method::POST,
        "/users",
        Some(&admin),
        json!({ "email": "new@example.com", "password": "Velvet-Harbor-42", "username": "New" }),
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let body = body.unwrap();
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["is_admin"], false);

    let user = login_token(&app, "new@example.com", "Velvet-Harbor-42").await;
    let req = json_request(
        Method::POST,
        "/users",
        Some(&user),
        json!({ "email": "other@example.com", "password": "Velvet-Harbor-42", "username": "Other" }),
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_duplicate_user_is_conflict() {
    let app = app().await;
    let admin = login_token(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let req = json_request(
        Method::POST,
        "/users",
        Some(&admin),
        json!({ "email": ADMIN_EMAIL, "password": "Velvet-Harbor-42", "username": "Dup" }),
    );
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body.unwrap()["status"], 409);
}

#[tokio::test]
async fn test_weak_password_is_bad_request() {
    let app = app().await;
    let admin = login_token(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let req = json_request(
        Method::POST,
        "/users",
        Some(&admin),
        json!({ "email": "weak@example.com", "password": "short", "username": "Weak" }),
    );
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
