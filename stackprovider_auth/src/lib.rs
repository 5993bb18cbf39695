//! stackprovider-auth - request gating in front of an external authentication provider
//!
//! The provider owns sessions, credentials, OAuth, two-factor and billing. This crate owns
//! the few decisions made before a request reaches it:
//!
//! - [`SessionGate`] decides whether a page request continues or is redirected, based only
//!   on whether a session cookie is present.
//! - [`PreAuthGuard`] rejects email/password sign-in attempts for unknown emails before the
//!   provider checks the password.
//! - [`RateLimiter`] counts requests to the provider's API per client.
//!
//! All of them are configured from an [`AuthConfig`] built once at start-up.

mod account;
mod billing;
mod config;
mod guard;
mod rate_limit;
mod routes;
mod session;

pub use account::{
    Account, AccountError, AccountStore, AccountStoreKind, InMemoryAccountStore, SqlAccountStore,
    connect_account_store, normalize_email,
};
pub use billing::{BillingConfig, SubscriptionPlan};
pub use config::{
    AuthConfig, ConfigError, DeployTarget, DeploymentProfile, DeviceAuthorizationConfig,
    RuntimeMode, SocialProvider, SocialProviders,
};
pub use guard::{CredentialSignIn, GuardError, NO_ACCOUNT_MESSAGE, PreAuthGuard};
pub use rate_limit::{RateLimitConfig, RateLimitDecision, RateLimiter};
pub use routes::{
    GateDecision, GateRequest, RouteClass, RouteConfig, RouteTable, SessionGate,
    StaticAssetFilter, callback_url_from_query,
};
pub use session::{
    CookieConfig, CookieSessionProvider, SameSite, SessionError, SessionProvider,
    clear_session_cookie_header, session_cookie_header,
};
