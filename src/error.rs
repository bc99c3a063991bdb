use std::{error::Error, fmt::Debug};

/// Key used to look up a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKey {
    Id(i64),
    Number(i64),
}

impl std::fmt::Display for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKey::Id(id) => write!(f, "id {}", id),
            AccountKey::Number(number) => write!(f, "number {}", number),
        }
    }
}

#[derive(thiserror::Error)]
pub enum CustomError {
    #[error("ENV '{0}' Not Found")]
    EnvError(String, #[source] std::env::VarError),

    #[error("ENV '{0}' has invalid value '{1}'")]
    ConfigError(String, String),

    #[error("Unsupported database url scheme '{0}'")]
    UnsupportedDatabase(String),

    #[error("Database connection")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Database query")]
    PersistenceError(#[source] sqlx::Error),

    #[error("Account with {0} not found")]
    NotFoundError(AccountKey),

    #[error("Hash password")]
    HashingError(#[source] bcrypt::BcryptError),
}

impl Debug for CustomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
