use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input rejected before touching the store.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced row does not exist (or is no longer active).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Wager placement against a fixture that is no longer open.
    #[error("betting closed for fixture {fixture_id}")]
    BettingClosed { fixture_id: i32 },

    /// Stake exceeds the user's current balance.
    #[error("insufficient funds: balance {balance}, stake {stake}")]
    InsufficientFunds { balance: i64, stake: i64 },

    /// Unique-name collision on registration or reference data.
    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },

    /// Re-settlement or re-review of a terminal row.
    #[error("{entity} {id} already settled")]
    AlreadySettled { entity: &'static str, id: i32 },

    #[error("credential hashing failed: {0}")]
    Credentials(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Storage(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
