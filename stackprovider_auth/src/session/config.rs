use crate::config::DeploymentProfile;

const COOKIE_PREFIX: &str = "stackprovider-auth";
const SESSION_COOKIE_NAME: &str = "stackprovider-auth-token";
const LAST_LOGIN_METHOD_COOKIE_NAME: &str = "stackprovider-auth-last-login-method";
const PRODUCTION_COOKIE_DOMAIN: &str = ".stackprovider.com";

/// Seven days, matching the provider's default session lifetime
const SESSION_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    pub prefix: String,
    pub session_token_name: String,
    pub last_login_method_name: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub cross_subdomain: bool,
    pub domain: Option<String>,
    pub max_age: u64,
}

impl CookieConfig {
    pub fn for_profile(profile: &DeploymentProfile) -> Self {
        let production = profile.is_production();
        Self {
            prefix: COOKIE_PREFIX.to_string(),
            session_token_name: SESSION_COOKIE_NAME.to_string(),
            last_login_method_name: LAST_LOGIN_METHOD_COOKIE_NAME.to_string(),
            http_only: true,
            secure: production,
            same_site: SameSite::Lax,
            cross_subdomain: production,
            domain: profile.cookie_domain(PRODUCTION_COOKIE_DOMAIN),
            max_age: SESSION_COOKIE_MAX_AGE,
        }
    }

    /// Name the session cookie is written under. Secure cookies carry the `__Secure-` prefix.
    pub fn session_cookie_name(&self) -> String {
        if self.secure {
            format!("__Secure-{}", self.session_token_name)
        } else {
            self.session_token_name.clone()
        }
    }

    /// Domain attribute, only set when cookies are shared across subdomains
    pub fn effective_domain(&self) -> Option<&str> {
        if self.cross_subdomain {
            self.domain.as_deref()
        } else {
            None
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self::for_profile(&DeploymentProfile::default())
    }
}
