//! Pre-sign-in guard
//!
//! Runs in front of the provider's email/password sign-in endpoint and refuses the
//! attempt when no account exists for the submitted email. Password verification is left
//! to the provider; this guard only ever performs one read against the account store.

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::account::{AccountError, AccountStore};
use crate::routes::RouteConfig;

pub const NO_ACCOUNT_MESSAGE: &str = "No account found with this email address";

#[derive(Debug, Error)]
pub enum GuardError {
    /// Client-facing validation failure
    #[error("{0}")]
    BadRequest(String),

    /// Lookup failure, passed through untouched
    #[error("Account store error: {0}")]
    Store(#[from] AccountError),
}

/// The part of a credential sign-in body the guard reads
#[derive(Debug, Default, Deserialize)]
pub struct CredentialSignIn {
    #[serde(default)]
    pub email: Option<String>,
}

impl CredentialSignIn {
    /// Parse a JSON request body. Anything that is not a JSON object with a string
    /// `email` yields `None`.
    pub fn email_from_json(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<CredentialSignIn>(body)
            .ok()
            .and_then(|sign_in| sign_in.email)
    }
}

#[derive(Clone)]
pub struct PreAuthGuard {
    sign_in_path: String,
    store: Arc<dyn AccountStore>,
}

impl PreAuthGuard {
    pub fn new(config: &RouteConfig, store: Arc<dyn AccountStore>) -> Self {
        Self {
            sign_in_path: config.credential_sign_in_path.clone(),
            store,
        }
    }

    /// Whether the guard fires for a path relative to the auth API mount
    pub fn applies_to(&self, path: &str) -> bool {
        path == self.sign_in_path
    }

    /// Check a sign-in attempt. A missing email is treated the same as an unknown one.
    #[tracing::instrument(skip(self, email))]
    pub async fn check(&self, path: &str, email: Option<&str>) -> Result<(), GuardError> {
        if !self.applies_to(path) {
            return Ok(());
        }

        let email = match email.map(str::trim) {
            Some(email) if !email.is_empty() => email,
            _ => {
                tracing::warn!("Credential sign-in without an email");
                return Err(GuardError::BadRequest(NO_ACCOUNT_MESSAGE.to_string()));
            }
        };

        match self.store.find_by_email(email).await? {
            Some(account) => {
                tracing::debug!(account_id = %account.id, "Account exists, sign-in may proceed");
                Ok(())
            }
            None => {
                tracing::warn!("Credential sign-in rejected: no account for submitted email");
                Err(GuardError::BadRequest(NO_ACCOUNT_MESSAGE.to_string()))
            }
        }
    }
}
