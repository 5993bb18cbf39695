use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum AccountError {
    #[error("Account already exists: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AccountError::Conflict(db_err.message().to_string())
            }
            _ => AccountError::Storage(err.to_string()),
        }
    }
}
