use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use super::AccountStore;
use super::errors::AccountError;
use super::types::{Account, normalize_email};

pub(crate) const DB_TABLE_ACCOUNTS: &str = "sp_accounts";

#[derive(Clone, Debug)]
enum AccountPool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

/// Account store backed by SQLite or PostgreSQL through sqlx
#[derive(Clone, Debug)]
pub struct SqlAccountStore {
    pool: AccountPool,
}

impl SqlAccountStore {
    pub async fn connect_sqlite(url: &str) -> Result<Self, AccountError> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(opts).await?;
        tracing::info!("Connected to SQLite account store");
        Self::from_sqlite_pool(pool).await
    }

    pub async fn connect_postgres(url: &str) -> Result<Self, AccountError> {
        let pool = PgPoolOptions::new().connect(url).await?;
        tracing::info!("Connected to PostgreSQL account store");
        Self::from_postgres_pool(pool).await
    }

    pub async fn from_sqlite_pool(pool: SqlitePool) -> Result<Self, AccountError> {
        create_tables_sqlite(&pool).await?;
        Ok(Self {
            pool: AccountPool::Sqlite(pool),
        })
    }

    pub async fn from_postgres_pool(pool: PgPool) -> Result<Self, AccountError> {
        create_tables_postgres(&pool).await?;
        Ok(Self {
            pool: AccountPool::Postgres(pool),
        })
    }
}

#[async_trait]
impl AccountStore for SqlAccountStore {
    #[tracing::instrument(skip_all)]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let email = normalize_email(email);

        let result = match &self.pool {
            AccountPool::Sqlite(pool) => find_by_email_sqlite(pool, &email).await,
            AccountPool::Postgres(pool) => find_by_email_postgres(pool, &email).await,
        };

        match &result {
            Ok(Some(account)) => {
                tracing::debug!(account_id = %account.id, "Account lookup completed");
            }
            Ok(None) => {
                tracing::debug!("Account lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "Account lookup failed");
            }
        }

        result
    }

    #[tracing::instrument(skip_all, fields(account_id = %account.id))]
    async fn insert_account(&self, account: Account) -> Result<Account, AccountError> {
        let account = Account {
            email: normalize_email(&account.email),
            ..account
        };
        if account.email.is_empty() {
            return Err(AccountError::InvalidData(
                "email must not be empty".to_string(),
            ));
        }

        match &self.pool {
            AccountPool::Sqlite(pool) => insert_account_sqlite(pool, &account).await?,
            AccountPool::Postgres(pool) => insert_account_postgres(pool, &account).await?,
        }

        tracing::info!("Account created");
        Ok(account)
    }
}

async fn create_tables_sqlite(pool: &SqlitePool) -> Result<(), AccountError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_ACCOUNTS} (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_tables_postgres(pool: &PgPool) -> Result<(), AccountError> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {DB_TABLE_ACCOUNTS} (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

async fn find_by_email_sqlite(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, AccountError> {
    sqlx::query_as::<_, Account>(&format!(
        r#"
        SELECT id, email, name, created_at, updated_at FROM {DB_TABLE_ACCOUNTS} WHERE email = ?
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(AccountError::from)
}

async fn find_by_email_postgres(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Account>, AccountError> {
    sqlx::query_as::<_, Account>(&format!(
        r#"
        SELECT id, email, name, created_at, updated_at FROM {DB_TABLE_ACCOUNTS} WHERE email = $1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(AccountError::from)
}

async fn insert_account_sqlite(pool: &SqlitePool, account: &Account) -> Result<(), AccountError> {
    sqlx::query(&format!(
        r#"
        INSERT INTO {DB_TABLE_ACCOUNTS} (id, email, name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#
    ))
    .bind(&account.id)
    .bind(&account.email)
    .bind(&account.name)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

async fn insert_account_postgres(pool: &PgPool, account: &Account) -> Result<(), AccountError> {
    sqlx::query(&format!(
        r#"
        INSERT INTO {DB_TABLE_ACCOUNTS} (id, email, name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        "#
    ))
    .bind(&account.id)
    .bind(&account.email)
    .bind(&account.name)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}
