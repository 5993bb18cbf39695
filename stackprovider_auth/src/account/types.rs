use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An account known to the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Account {
    /// Unique account identifier
    pub id: String,
    /// Login email, stored normalized
    pub email: String,
    /// Display name
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a generated id and a normalized email
    pub fn new(email: &str, name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: normalize_email(email),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Emails are compared trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
