//! Axum integration for stackprovider-auth
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{Router, routing::{get, post}};
//! use stackprovider_auth::{AuthConfig, InMemoryAccountStore};
//! use stackprovider_auth_axum::{AuthState, auth_api_router, with_session_gate};
//!
//! # fn build() -> Result<Router, Box<dyn std::error::Error>> {
//! let config = Arc::new(AuthConfig::from_env()?);
//! let state = AuthState::new(config, Arc::new(InMemoryAccountStore::new()));
//!
//! let pages = Router::new()
//!     .route("/", get(|| async { "home" }))
//!     .route("/settings", get(|| async { "settings" }));
//! let provider_api = Router::new().route("/sign-in/email", post(|| async { "signed in" }));
//!
//! let app = with_session_gate(pages, state.clone()).merge(auth_api_router(provider_api, state));
//! # Ok(app)
//! # }
//! ```

mod error;
mod middleware;
mod router;
mod state;

pub use error::ApiError;
pub use middleware::{pre_auth_guard, rate_limit, session_gate};
pub use router::{auth_api_router, auth_api_router_no_trace, with_session_gate};
pub use state::AuthState;

// Re-export the core crate so applications need only one dependency
pub use stackprovider_auth;
