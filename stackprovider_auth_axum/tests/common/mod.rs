#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
    routing::{get, post},
};
use stackprovider_auth::{Account, AccountStore, AuthConfig, InMemoryAccountStore};
use stackprovider_auth_axum::{AuthState, auth_api_router_no_trace, with_session_gate};
use tower::ServiceExt;

pub const SESSION_COOKIE: &str = "stackprovider-auth-token=opaque-token";

pub fn test_config() -> AuthConfig {
    AuthConfig::from_lookup(|_| None).expect("default configuration is valid")
}

pub async fn store_with(emails: &[&str]) -> Arc<InMemoryAccountStore> {
    let store = Arc::new(InMemoryAccountStore::new());
    for email in emails {
        store
            .insert_account(Account::new(email, "Test User"))
            .await
            .expect("seeding accounts should succeed");
    }
    store
}

async fn home() -> &'static str {
    "home"
}
async fn about() -> &'static str {
    "about"
}
async fn sign_in() -> &'static str {
    "sign-in"
}
async fn reset_password() -> &'static str {
    "reset-password"
}
async fn settings() -> &'static str {
    "settings"
}
async fn logo() -> &'static str {
    "logo"
}

pub fn pages() -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(about))
        .route("/sign-in", get(sign_in))
        .route("/forget-password", get(reset_password))
        .route("/reset-password", get(reset_password))
        .route("/two-factor", get(sign_in))
        .route("/settings", get(settings))
        .route("/dashboard", get(settings))
        .route("/logo.png", get(logo))
}

async fn echo(body: String) -> String {
    body
}

async fn get_session() -> &'static str {
    "session"
}

/// Stand-in provider API that echoes the body it receives
pub fn provider_api() -> Router {
    Router::new()
        .route("/sign-in/email", post(echo))
        .route("/sign-up/email", post(echo))
        .route("/get-session", get(get_session))
}

pub fn app(state: AuthState) -> Router {
    with_session_gate(pages(), state.clone())
        .merge(auth_api_router_no_trace(provider_api(), state))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}
