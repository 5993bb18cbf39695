use std::sync::Arc;

use stackprovider_auth::{
    AccountStore, AuthConfig, CookieSessionProvider, PreAuthGuard, RateLimiter, SessionGate,
    SessionProvider, StaticAssetFilter,
};

/// Everything the middleware needs, built once from an [`AuthConfig`]
#[derive(Clone)]
pub struct AuthState {
    pub(crate) config: Arc<AuthConfig>,
    pub(crate) gate: Arc<SessionGate>,
    pub(crate) assets: Arc<StaticAssetFilter>,
    pub(crate) provider: Arc<dyn SessionProvider>,
    pub(crate) guard: PreAuthGuard,
    pub(crate) limiter: Arc<RateLimiter>,
}

impl AuthState {
    /// Uses the cookie-presence provider and the default static asset filter
    pub fn new(config: Arc<AuthConfig>, accounts: Arc<dyn AccountStore>) -> Self {
        Self {
            gate: Arc::new(SessionGate::new(&config.routes)),
            assets: Arc::new(StaticAssetFilter::default()),
            provider: Arc::new(CookieSessionProvider::from_config(&config.cookies)),
            guard: PreAuthGuard::new(&config.routes, accounts),
            limiter: Arc::new(RateLimiter::new(config.rate_limit.clone())),
            config,
        }
    }

    pub fn with_session_provider(mut self, provider: Arc<dyn SessionProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_asset_filter(mut self, assets: StaticAssetFilter) -> Self {
        self.assets = Arc::new(assets);
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
