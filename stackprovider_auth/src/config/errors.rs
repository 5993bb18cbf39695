use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required variable: {0}")]
    Missing(String),

    #[error(
        "Unsupported account store type: {0}. Supported types are 'memory', 'sqlite' and 'postgres'"
    )]
    UnsupportedStore(String),
}
