//! Minimal stand-in for the external provider's HTTP API
//!
//! Password checks, OAuth and two-factor are out of scope here. A sign-in that gets past the
//! pre-auth guard is accepted and receives an opaque session cookie.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use stackprovider_auth_axum::stackprovider_auth::{
    AuthConfig, clear_session_cookie_header, session_cookie_header,
};

#[derive(Debug, Deserialize)]
struct EmailSignIn {
    email: String,
}

pub(crate) fn router(config: Arc<AuthConfig>) -> Router {
    Router::new()
        .route("/sign-in/email", post(sign_in_email))
        .route("/sign-out", post(sign_out))
        .route("/subscription/plans", get(plans))
        .with_state(config)
}

async fn sign_in_email(
    State(config): State<Arc<AuthConfig>>,
    Json(body): Json<EmailSignIn>,
) -> Response {
    let token = uuid::Uuid::new_v4().simple().to_string();
    match session_cookie_header(&config.cookies, &token) {
        Ok(cookie) => {
            tracing::info!(email = %body.email, "Demo provider issued a session");
            (StatusCode::OK, [(SET_COOKIE, cookie)], "signed in").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to build session cookie");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn sign_out(State(config): State<Arc<AuthConfig>>) -> Response {
    match clear_session_cookie_header(&config.cookies) {
        Ok(cookie) => (StatusCode::OK, [(SET_COOKIE, cookie)], "signed out").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build session cookie");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn plans(State(config): State<Arc<AuthConfig>>) -> Response {
    if !config.billing.subscriptions_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(config.billing.plans.clone()).into_response()
}
