//! Account persistence
//!
//! The guard only ever reads from the store. `insert_account` exists for provisioning
//! (the demo seeds accounts with it) and for tests.

mod errors;
mod memory;
mod sql;
mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::ConfigError;

pub use errors::AccountError;
pub use memory::InMemoryAccountStore;
pub use sql::SqlAccountStore;
pub use types::{Account, normalize_email};

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by email. `Ok(None)` means no account matches.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    async fn insert_account(&self, account: Account) -> Result<Account, AccountError>;
}

/// Which account store backend to open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccountStoreKind {
    #[default]
    Memory,
    Sqlite(String),
    Postgres(String),
}

impl AccountStoreKind {
    pub(crate) fn from_vars(
        store_type: Option<&str>,
        store_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let url = || {
            store_url
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::Missing("ACCOUNT_STORE_URL".to_string()))
        };

        match store_type.unwrap_or("memory") {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite(url()?)),
            "postgres" => Ok(Self::Postgres(url()?)),
            other => Err(ConfigError::UnsupportedStore(other.to_string())),
        }
    }
}

/// Open the configured account store
pub async fn connect_account_store(
    kind: &AccountStoreKind,
) -> Result<Arc<dyn AccountStore>, AccountError> {
    let store: Arc<dyn AccountStore> = match kind {
        AccountStoreKind::Memory => Arc::new(InMemoryAccountStore::new()),
        AccountStoreKind::Sqlite(url) => Arc::new(SqlAccountStore::connect_sqlite(url).await?),
        AccountStoreKind::Postgres(url) => {
            Arc::new(SqlAccountStore::connect_postgres(url).await?)
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_kind_defaults_to_memory() {
        assert_eq!(
            AccountStoreKind::from_vars(None, None),
            Ok(AccountStoreKind::Memory)
        );
    }

    #[test]
    fn test_store_kind_sqlite_requires_url() {
        assert_eq!(
            AccountStoreKind::from_vars(Some("sqlite"), None),
            Err(ConfigError::Missing("ACCOUNT_STORE_URL".to_string()))
        );
        assert_eq!(
            AccountStoreKind::from_vars(Some("sqlite"), Some("sqlite:accounts.db")),
            Ok(AccountStoreKind::Sqlite("sqlite:accounts.db".to_string()))
        );
    }

    #[test]
    fn test_store_kind_rejects_unknown_type() {
        assert_eq!(
            AccountStoreKind::from_vars(Some("mongodb"), Some("mongodb://localhost")),
            Err(ConfigError::UnsupportedStore("mongodb".to_string()))
        );
    }

    #[tokio::test]
    async fn test_connect_memory_store() {
        let store = connect_account_store(&AccountStoreKind::Memory)
            .await
            .expect("memory store always opens");

        store
            .insert_account(Account::new("known@x.com", "Known"))
            .await
            .unwrap();
        assert!(store.find_by_email("known@x.com").await.unwrap().is_some());
    }
}
