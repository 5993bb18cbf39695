//! Deployment profile selection
//!
//! The same binary runs locally, on hosted preview deployments and on the hosted
//! production deployment. Everything that differs between those (cookie domain, cookie
//! security, fallback URLs) is derived from a single [`DeploymentProfile`] chosen at start-up.

/// How the process was built and launched (`APP_ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

/// Where the process is deployed (`DEPLOY_HOSTED`, `DEPLOY_ENV`, `DEPLOY_URL`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeployTarget {
    /// Not running on the hosting platform
    #[default]
    Local,
    /// Hosted production deployment
    Production,
    /// Hosted preview deployment, reachable under its own host name
    Preview { host: Option<String> },
    /// Hosted, but neither production nor preview
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeploymentProfile {
    pub mode: RuntimeMode,
    pub target: DeployTarget,
}

impl DeploymentProfile {
    pub fn new(mode: RuntimeMode, target: DeployTarget) -> Self {
        Self { mode, target }
    }

    /// Build a profile from raw variable values
    pub(crate) fn from_vars(
        app_env: Option<&str>,
        hosted: Option<&str>,
        deploy_env: Option<&str>,
        deploy_url: Option<&str>,
    ) -> Self {
        let mode = match app_env {
            Some(v) if v.eq_ignore_ascii_case("production") => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        };

        let target = if hosted == Some("1") {
            match deploy_env {
                Some("production") => DeployTarget::Production,
                Some("preview") => DeployTarget::Preview {
                    host: deploy_url.filter(|h| !h.is_empty()).map(str::to_string),
                },
                _ => DeployTarget::Other,
            }
        } else {
            DeployTarget::Local
        };

        Self { mode, target }
    }

    pub fn is_production(&self) -> bool {
        self.mode == RuntimeMode::Production
    }

    /// Cookie domain shared across subdomains, if the deployment has one
    pub fn cookie_domain(&self, production_domain: &str) -> Option<String> {
        match &self.target {
            DeployTarget::Production => Some(production_domain.to_string()),
            DeployTarget::Preview { host: Some(host) } => Some(format!(".{host}")),
            _ => None,
        }
    }
}
