use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, HeaderValue, header::RETRY_AFTER};
use http_body_util::LengthLimitError;

use stackprovider_auth::{
    CredentialSignIn, GateDecision, GateRequest, RateLimitDecision, callback_url_from_query,
};

use super::error::{ApiError, IntoResponseError};
use super::state::AuthState;

/// Sign-in bodies are tiny; anything bigger is refused before parsing
const MAX_SIGN_IN_BODY_BYTES: usize = 16 * 1024;

/// Redirects page requests according to the route policy and session-cookie presence
///
/// Static assets bypass the gate. Apply this to the page router, not to the auth API.
pub async fn session_gate(State(state): State<AuthState>, req: Request, next: Next) -> Response {
    let path = req.uri().path();
    if state.assets.is_excluded(path) {
        return next.run(req).await;
    }

    let callback_url = callback_url_from_query(req.uri().query());
    let is_logged_in = state.provider.has_session_cookie(req.headers());
    let request = GateRequest::new(path, is_logged_in).with_callback_url(callback_url.as_deref());

    match state.gate.decide(&request) {
        GateDecision::Continue => next.run(req).await,
        GateDecision::Redirect(location) => {
            tracing::debug!(path, is_logged_in, %location, "Session gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Rejects credential sign-in attempts for unknown emails before the provider sees them
///
/// Paths are matched relative to the auth API mount, so this belongs on the provider's
/// router before it is nested.
pub async fn pre_auth_guard(State(state): State<AuthState>, req: Request, next: Next) -> Response {
    if !state.guard.applies_to(req.uri().path()) {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_SIGN_IN_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read sign-in request body");
            return body_read_error(e).into_response();
        }
    };

    let email = CredentialSignIn::email_from_json(&bytes);
    if let Err(err) = state
        .guard
        .check(parts.uri.path(), email.as_deref())
        .await
        .into_response_error()
    {
        return err.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Fixed-window rate limiting keyed by client address
pub async fn rate_limit(State(state): State<AuthState>, req: Request, next: Next) -> Response {
    let key = client_key(&req);

    match state.limiter.check(&key).await {
        RateLimitDecision::Allowed { .. } => next.run(req).await,
        RateLimitDecision::Limited { retry_after } => {
            let mut response = ApiError::too_many_requests().into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs(retry_after)));
            response
        }
    }
}

fn body_read_error(err: axum::Error) -> ApiError {
    if err.into_inner().is::<LengthLimitError>() {
        ApiError::payload_too_large()
    } else {
        ApiError::bad_request("Failed to read request body")
    }
}

/// Whole seconds until the window resets, rounded up and never zero
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}

fn client_key(req: &Request) -> String {
    forwarded_client(req.headers())
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_client(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header_value(headers, "x-real-ip"))
        .map(str::to_string)
}

fn header_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
