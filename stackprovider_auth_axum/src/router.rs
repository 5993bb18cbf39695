//! Router helpers that put the gate, guard and limiter in the right places

use axum::{Router, middleware::from_fn_with_state};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::{pre_auth_guard, rate_limit, session_gate};
use super::state::AuthState;

/// Wrap the application's page router with the session gate
///
/// Every route in `pages`, and its fallback, goes through the gate. Merge the auth API
/// router next to it rather than into it, so API calls are never redirected.
pub fn with_session_gate<S>(pages: Router<S>, state: AuthState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pages.layer(from_fn_with_state(state, session_gate))
}

/// Mount the provider's HTTP API under the configured prefix
///
/// The provider router sees paths relative to the prefix. Requests are rate limited first,
/// then credential sign-ins pass the pre-auth guard. Requests are traced at INFO level.
pub fn auth_api_router(provider_api: Router, state: AuthState) -> Router {
    auth_api_router_no_trace(provider_api, state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`auth_api_router`] without the HTTP tracing layer
pub fn auth_api_router_no_trace(provider_api: Router, state: AuthState) -> Router {
    let prefix = state.config().routes.auth_route_prefix.clone();
    let guarded = provider_api
        .layer(from_fn_with_state(state.clone(), pre_auth_guard))
        .layer(from_fn_with_state(state, rate_limit));

    Router::new().nest(&prefix, guarded)
}
