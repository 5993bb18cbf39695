use std::collections::HashSet;

const PUBLIC_ROUTES: [&str; 3] = ["/", "/about", "/contact"];
const AUTH_ROUTES: [&str; 4] = ["/sign-in", "/forget-password", "/reset-password", "/two-factor"];
const SIGN_IN_PATH: &str = "/sign-in";
const HOME_PATH: &str = "/";
const CREDENTIAL_SIGN_IN_PATH: &str = "/sign-in/email";
pub(crate) const DEFAULT_AUTH_ROUTE_PREFIX: &str = "/api/auth";

/// Static route configuration shared by the gate and the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Reachable by everyone
    pub public_routes: Vec<String>,
    /// Sign-in style screens a signed-in user should not see again
    pub auth_routes: Vec<String>,
    /// Where anonymous users are sent
    pub sign_in_path: String,
    /// Fallback destination for signed-in users on auth routes
    pub home_path: String,
    /// Mount point of the provider's HTTP API
    pub auth_route_prefix: String,
    /// Email/password sign-in endpoint, relative to `auth_route_prefix`
    pub credential_sign_in_path: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_routes: PUBLIC_ROUTES.iter().map(|s| s.to_string()).collect(),
            auth_routes: AUTH_ROUTES.iter().map(|s| s.to_string()).collect(),
            sign_in_path: SIGN_IN_PATH.to_string(),
            home_path: HOME_PATH.to_string(),
            auth_route_prefix: DEFAULT_AUTH_ROUTE_PREFIX.to_string(),
            credential_sign_in_path: CREDENTIAL_SIGN_IN_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    AuthOnly,
    Protected,
}

/// Exact-match lookup table built from a [`RouteConfig`]
#[derive(Debug, Clone)]
pub struct RouteTable {
    public: HashSet<String>,
    auth: HashSet<String>,
}

impl RouteTable {
    pub fn new(config: &RouteConfig) -> Self {
        Self {
            public: config.public_routes.iter().cloned().collect(),
            auth: config.auth_routes.iter().cloned().collect(),
        }
    }

    /// Public wins when a path is listed in both sets
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public.contains(path) {
            RouteClass::Public
        } else if self.auth.contains(path) {
            RouteClass::AuthOnly
        } else {
            RouteClass::Protected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_routes() {
        let table = RouteTable::new(&RouteConfig::default());

        assert_eq!(table.classify("/"), RouteClass::Public);
        assert_eq!(table.classify("/about"), RouteClass::Public);
        assert_eq!(table.classify("/contact"), RouteClass::Public);
        assert_eq!(table.classify("/sign-in"), RouteClass::AuthOnly);
        assert_eq!(table.classify("/forget-password"), RouteClass::AuthOnly);
        assert_eq!(table.classify("/reset-password"), RouteClass::AuthOnly);
        assert_eq!(table.classify("/two-factor"), RouteClass::AuthOnly);
        assert_eq!(table.classify("/settings"), RouteClass::Protected);
    }

    #[test]
    fn test_classify_is_exact_match() {
        let table = RouteTable::new(&RouteConfig::default());

        assert_eq!(table.classify("/about/"), RouteClass::Protected);
        assert_eq!(table.classify("/about/team"), RouteClass::Protected);
        assert_eq!(table.classify("/sign-in/email"), RouteClass::Protected);
        assert_eq!(table.classify("/ABOUT"), RouteClass::Protected);
        assert_eq!(table.classify(""), RouteClass::Protected);
    }

    #[test]
    fn test_public_takes_precedence() {
        let config = RouteConfig {
            public_routes: vec!["/sign-in".to_string()],
            ..RouteConfig::default()
        };
        let table = RouteTable::new(&config);

        assert_eq!(table.classify("/sign-in"), RouteClass::Public);
    }
}
