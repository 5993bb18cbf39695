use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Cookie error: {0}")]
    Cookie(String),
}
