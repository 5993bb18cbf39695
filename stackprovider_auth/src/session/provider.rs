use headers::HeaderMapExt;
use http::HeaderMap;

use super::config::CookieConfig;

/// The slice of the authentication provider the gate depends on
///
/// Everything else the provider does (credential checks, OAuth, two-factor, billing) stays
/// behind its own API. Implementations must only report whether a session cookie is
/// present; validating the token is the provider's job.
pub trait SessionProvider: Send + Sync {
    fn has_session_cookie(&self, headers: &HeaderMap) -> bool;
}

/// Reports a session when the configured session cookie, or its `__Secure-` variant,
/// carries a non-empty value
#[derive(Debug, Clone)]
pub struct CookieSessionProvider {
    cookie_name: String,
    secure_cookie_name: String,
}

impl CookieSessionProvider {
    pub fn new(cookie_name: &str) -> Self {
        Self {
            cookie_name: cookie_name.to_string(),
            secure_cookie_name: format!("__Secure-{cookie_name}"),
        }
    }

    pub fn from_config(config: &CookieConfig) -> Self {
        Self::new(&config.session_token_name)
    }
}

impl SessionProvider for CookieSessionProvider {
    fn has_session_cookie(&self, headers: &HeaderMap) -> bool {
        let Some(cookies) = headers.typed_get::<headers::Cookie>() else {
            return false;
        };

        [&self.cookie_name, &self.secure_cookie_name]
            .into_iter()
            .any(|name| cookies.get(name).is_some_and(|value| !value.is_empty()))
    }
}
