use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::AccountStore;
use super::errors::AccountError;
use super::types::{Account, normalize_email};

/// Account store kept in process memory, keyed by normalized email
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory account store");
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    #[tracing::instrument(skip_all)]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let key = normalize_email(email);
        Ok(self.accounts.read().await.get(&key).cloned())
    }

    async fn insert_account(&self, account: Account) -> Result<Account, AccountError> {
        let key = normalize_email(&account.email);
        if key.is_empty() {
            return Err(AccountError::InvalidData(
                "email must not be empty".to_string(),
            ));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AccountError::Conflict(key));
        }

        let account = Account {
            email: key.clone(),
            ..account
        };
        accounts.insert(key, account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_unknown_email_returns_none() {
        let store = InMemoryAccountStore::new();

        let result = store.find_by_email("nobody@x.com").await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = InMemoryAccountStore::new();
        let account = Account::new("known@x.com", "Known");

        store
            .insert_account(account.clone())
            .await
            .expect("insert should succeed");

        let found = store
            .find_by_email("known@x.com")
            .await
            .expect("lookup should succeed");
        assert_eq!(found, Some(account));
    }

    #[tokio::test]
    async fn test_lookup_ignores_case_and_whitespace() {
        let store = InMemoryAccountStore::new();
        store
            .insert_account(Account::new("known@x.com", "Known"))
            .await
            .unwrap();

        let found = store.find_by_email(" KNOWN@X.com ").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_insert_conflicts() {
        let store = InMemoryAccountStore::new();
        store
            .insert_account(Account::new("known@x.com", "Known"))
            .await
            .unwrap();

        let result = store
            .insert_account(Account::new("Known@x.com", "Again"))
            .await;

        assert!(matches!(result, Err(AccountError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_email() {
        let store = InMemoryAccountStore::new();

        let result = store.insert_account(Account::new("   ", "Blank")).await;

        assert!(matches!(result, Err(AccountError::InvalidData(_))));
    }
}
