use http::HeaderValue;

use super::config::CookieConfig;
use super::errors::SessionError;

/// Build the `Set-Cookie` value that stores a session token
pub fn session_cookie_header(
    config: &CookieConfig,
    token: &str,
) -> Result<HeaderValue, SessionError> {
    let cookie = format!(
        "{}={}{}",
        config.session_cookie_name(),
        token,
        cookie_attributes(config, config.max_age)
    );
    HeaderValue::from_str(&cookie).map_err(|e| SessionError::Cookie(e.to_string()))
}

/// Build the `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie_header(config: &CookieConfig) -> Result<HeaderValue, SessionError> {
    let cookie = format!(
        "{}={}",
        config.session_cookie_name(),
        cookie_attributes(config, 0)
    );
    HeaderValue::from_str(&cookie).map_err(|e| SessionError::Cookie(e.to_string()))
}

fn cookie_attributes(config: &CookieConfig, max_age: u64) -> String {
    let mut attrs = format!("; Path=/; Max-Age={max_age}");
    if config.http_only {
        attrs.push_str("; HttpOnly");
    }
    if config.secure {
        attrs.push_str("; Secure");
    }
    attrs.push_str("; SameSite=");
    attrs.push_str(config.same_site.as_str());
    if let Some(domain) = config.effective_domain() {
        attrs.push_str("; Domain=");
        attrs.push_str(domain);
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeployTarget, DeploymentProfile, RuntimeMode};

    #[test]
    fn test_development_session_cookie() {
        let config = CookieConfig::default();

        let header = session_cookie_header(&config, "token123").unwrap();

        assert_eq!(
            header.to_str().unwrap(),
            "stackprovider-auth-token=token123; Path=/; Max-Age=604800; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_production_session_cookie() {
        let profile = DeploymentProfile::new(RuntimeMode::Production, DeployTarget::Production);
        let config = CookieConfig::for_profile(&profile);

        let header = session_cookie_header(&config, "token123").unwrap();
        let value = header.to_str().unwrap();

        assert!(value.starts_with("__Secure-stackprovider-auth-token=token123;"));
        assert!(value.contains("; Secure"));
        assert!(value.ends_with("; Domain=.stackprovider.com"));
    }

    #[test]
    fn test_clear_session_cookie() {
        let config = CookieConfig::default();

        let header = clear_session_cookie_header(&config).unwrap();

        assert!(
            header
                .to_str()
                .unwrap()
                .starts_with("stackprovider-auth-token=; Path=/; Max-Age=0")
        );
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let config = CookieConfig::default();

        let result = session_cookie_header(&config, "bad\ntoken");

        assert!(matches!(result, Err(SessionError::Cookie(_))));
    }
}
