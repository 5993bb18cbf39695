//! Process-wide configuration
//!
//! Built once at start-up from the environment (or any key lookup in tests) and shared
//! immutably. Components never read the environment themselves.

mod errors;
mod profile;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::account::AccountStoreKind;
use crate::billing::BillingConfig;
use crate::rate_limit::RateLimitConfig;
use crate::routes::{DEFAULT_AUTH_ROUTE_PREFIX, RouteConfig};
use crate::session::CookieConfig;

pub use errors::ConfigError;
pub use profile::{DeployTarget, DeploymentProfile, RuntimeMode};

const APP_NAME: &str = "Stack Provider Demo";
const DEFAULT_EMAIL_FROM: &str = "delivered@resend.dev";
const DEVELOPMENT_BASE_URL: &str = "http://localhost:3001";
const FALLBACK_BASE_URL: &str = "https://demo.stackprovider.com";
const DEFAULT_ADMIN_USER_IDS: &str = "EXD5zjob2SD6CBWcEQ6OpLRHcyoUbnaB";
const TRUSTED_ORIGINS: [&str; 1] = ["exp://"];
const TRUSTED_PROVIDERS: [&str; 3] = ["google", "github", "demo-app"];
const DEVICE_CODE_EXPIRES_IN_SECS: u64 = 3 * 60;
const DEVICE_CODE_INTERVAL_SECS: u64 = 5;

#[derive(Clone, Default)]
pub struct SocialProvider {
    pub client_id: String,
    pub client_secret: String,
}

impl SocialProvider {
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl fmt::Debug for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SocialProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SocialProviders {
    pub github: SocialProvider,
    pub google: SocialProvider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAuthorizationConfig {
    pub expires_in: Duration,
    pub interval: Duration,
}

impl Default for DeviceAuthorizationConfig {
    fn default() -> Self {
        Self {
            expires_in: Duration::from_secs(DEVICE_CODE_EXPIRES_IN_SECS),
            interval: Duration::from_secs(DEVICE_CODE_INTERVAL_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub app_name: String,
    /// Public base URL of the deployment, if known
    pub base_url: Option<String>,
    pub profile: DeploymentProfile,
    /// Sender address for outbound mail
    pub email_from: String,
    pub routes: RouteConfig,
    pub cookies: CookieConfig,
    pub rate_limit: RateLimitConfig,
    pub billing: BillingConfig,
    pub device_authorization: DeviceAuthorizationConfig,
    pub social_providers: SocialProviders,
    pub account_store: AccountStoreKind,
    pub trusted_origins: Vec<String>,
    /// Providers whose accounts may be linked automatically
    pub trusted_providers: Vec<String>,
    pub admin_user_ids: Vec<String>,
}

impl AuthConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = DeploymentProfile::from_vars(
            lookup("APP_ENV").as_deref(),
            lookup("DEPLOY_HOSTED").as_deref(),
            lookup("DEPLOY_ENV").as_deref(),
            lookup("DEPLOY_URL").as_deref(),
        );

        let routes = RouteConfig {
            auth_route_prefix: lookup("AUTH_ROUTE_PREFIX")
                .unwrap_or_else(|| DEFAULT_AUTH_ROUTE_PREFIX.to_string()),
            ..RouteConfig::default()
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            enabled: parse_var(&lookup, "AUTH_RATE_LIMIT_ENABLED", defaults.enabled)?,
            window: Duration::from_secs(parse_var(
                &lookup,
                "AUTH_RATE_LIMIT_WINDOW",
                defaults.window.as_secs(),
            )?),
            max_requests: parse_var(&lookup, "AUTH_RATE_LIMIT_MAX", defaults.max_requests)?,
        };

        let social_provider = |id_key: &str, secret_key: &str| SocialProvider {
            client_id: lookup(id_key).unwrap_or_default(),
            client_secret: lookup(secret_key).unwrap_or_default(),
        };
        let social_providers = SocialProviders {
            github: social_provider("GITHUB_CLIENT_ID", "GITHUB_CLIENT_SECRET"),
            google: social_provider("GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET"),
        };

        let account_store = AccountStoreKind::from_vars(
            lookup("ACCOUNT_STORE_TYPE").as_deref(),
            lookup("ACCOUNT_STORE_URL").as_deref(),
        )?;

        let admin_user_ids = lookup("ADMIN_USER_IDS")
            .unwrap_or_else(|| DEFAULT_ADMIN_USER_IDS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            app_name: APP_NAME.to_string(),
            base_url: lookup("AUTH_BASE_URL")
                .filter(|url| !url.is_empty())
                .map(|url| url.trim_end_matches('/').to_string()),
            cookies: CookieConfig::for_profile(&profile),
            profile,
            email_from: lookup("AUTH_EMAIL_FROM")
                .filter(|from| !from.is_empty())
                .unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            routes,
            rate_limit,
            billing: BillingConfig::from_lookup(&lookup),
            device_authorization: DeviceAuthorizationConfig::default(),
            social_providers,
            account_store,
            trusted_origins: TRUSTED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            trusted_providers: TRUSTED_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            admin_user_ids,
        })
    }

    /// Issuer shown in authenticator apps
    pub fn two_factor_issuer(&self) -> &str {
        &self.app_name
    }

    /// Base URL for links sent to users
    pub fn public_base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url,
            None if self.profile.is_production() => FALLBACK_BASE_URL,
            None => DEVELOPMENT_BASE_URL,
        }
    }

    pub fn invitation_link(&self, invitation_id: &str) -> String {
        format!(
            "{}/accept-invitation/{}",
            self.public_base_url(),
            urlencoding::encode(invitation_id)
        )
    }

    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_user_ids.iter().any(|id| id == user_id)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) if value.trim().is_empty() => Ok(default),
        Some(value) => value
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AuthConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("empty environment is valid");

        assert_eq!(config.app_name, "Stack Provider Demo");
        assert_eq!(config.two_factor_issuer(), "Stack Provider Demo");
        assert_eq!(config.base_url, None);
        assert_eq!(config.profile, DeploymentProfile::default());
        assert_eq!(config.email_from, "delivered@resend.dev");
        assert_eq!(config.routes, RouteConfig::default());
        assert_eq!(config.rate_limit, RateLimitConfig::default());
        assert_eq!(config.account_store, AccountStoreKind::Memory);
        assert_eq!(config.trusted_origins, vec!["exp://"]);
        assert_eq!(config.trusted_providers, vec!["google", "github", "demo-app"]);
        assert!(config.is_admin("EXD5zjob2SD6CBWcEQ6OpLRHcyoUbnaB"));
        assert_eq!(
            config.device_authorization.expires_in,
            Duration::from_secs(180)
        );
        assert_eq!(config.device_authorization.interval, Duration::from_secs(5));
        assert!(!config.social_providers.github.is_configured());
        assert!(!config.cookies.secure);
    }

    #[test]
    fn test_production_profile() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("DEPLOY_HOSTED", "1"),
            ("DEPLOY_ENV", "production"),
        ])
        .unwrap();

        assert!(config.profile.is_production());
        assert!(config.cookies.secure);
        assert!(config.cookies.cross_subdomain);
        assert_eq!(config.cookies.effective_domain(), Some(".stackprovider.com"));
        assert_eq!(config.public_base_url(), "https://demo.stackprovider.com");
    }

    #[test]
    fn test_preview_profile() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("DEPLOY_HOSTED", "1"),
            ("DEPLOY_ENV", "preview"),
            ("DEPLOY_URL", "pr-42.preview.example.app"),
        ])
        .unwrap();

        assert_eq!(
            config.cookies.effective_domain(),
            Some(".pr-42.preview.example.app")
        );
    }

    #[test]
    fn test_development_profile_has_no_cookie_domain() {
        let config = config_from(&[("DEPLOY_HOSTED", "1"), ("DEPLOY_ENV", "production")]).unwrap();

        assert!(!config.cookies.secure);
        assert_eq!(config.cookies.effective_domain(), None);
    }

    #[test]
    fn test_base_url_and_invitation_link() {
        let config = config_from(&[("AUTH_BASE_URL", "https://app.example.com/")]).unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://app.example.com"));
        assert_eq!(
            config.invitation_link("inv_123"),
            "https://app.example.com/accept-invitation/inv_123"
        );
    }

    #[test]
    fn test_invitation_link_development_fallback() {
        let config = config_from(&[]).unwrap();

        assert_eq!(
            config.invitation_link("inv 1"),
            "http://localhost:3001/accept-invitation/inv%201"
        );
    }

    #[test]
    fn test_rate_limit_overrides() {
        let config = config_from(&[
            ("AUTH_RATE_LIMIT_ENABLED", "FALSE"),
            ("AUTH_RATE_LIMIT_WINDOW", "10"),
            ("AUTH_RATE_LIMIT_MAX", " 5 "),
        ])
        .unwrap();

        assert!(!config.rate_limit.enabled);
        assert_eq!(config.rate_limit.window, Duration::from_secs(10));
        assert_eq!(config.rate_limit.max_requests, 5);
    }

    #[test]
    fn test_invalid_rate_limit_is_an_error() {
        let result = config_from(&[("AUTH_RATE_LIMIT_MAX", "lots")]);

        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidValue {
                key: "AUTH_RATE_LIMIT_MAX".to_string(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn test_account_store_and_prefix() {
        let config = config_from(&[
            ("ACCOUNT_STORE_TYPE", "sqlite"),
            ("ACCOUNT_STORE_URL", "sqlite:accounts.db"),
            ("AUTH_ROUTE_PREFIX", "/auth"),
        ])
        .unwrap();

        assert_eq!(
            config.account_store,
            AccountStoreKind::Sqlite("sqlite:accounts.db".to_string())
        );
        assert_eq!(config.routes.auth_route_prefix, "/auth");
        assert_eq!(config.routes.credential_sign_in_path, "/sign-in/email");
    }

    #[test]
    fn test_admin_user_ids_list() {
        let config = config_from(&[("ADMIN_USER_IDS", "a, b,,c")]).unwrap();

        assert_eq!(config.admin_user_ids, vec!["a", "b", "c"]);
        assert!(!config.is_admin("EXD5zjob2SD6CBWcEQ6OpLRHcyoUbnaB"));
    }

    #[test]
    fn test_social_provider_secret_is_redacted() {
        let config = config_from(&[
            ("GITHUB_CLIENT_ID", "gh-id"),
            ("GITHUB_CLIENT_SECRET", "gh-secret"),
        ])
        .unwrap();

        assert!(config.social_providers.github.is_configured());
        let debug = format!("{config:?}");
        assert!(debug.contains("gh-id"));
        assert!(!debug.contains("gh-secret"));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        let original = std::env::var("AUTH_EMAIL_FROM").ok();
        unsafe {
            std::env::set_var("AUTH_EMAIL_FROM", "noreply@example.com");
        }

        let config = AuthConfig::from_env();

        unsafe {
            match original {
                Some(value) => std::env::set_var("AUTH_EMAIL_FROM", value),
                None => std::env::remove_var("AUTH_EMAIL_FROM"),
            }
        }

        assert_eq!(config.unwrap().email_from, "noreply@example.com");
    }
}
