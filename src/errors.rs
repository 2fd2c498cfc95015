use thiserror::Error;
use uuid::Uuid;

/// Error type covering validation, lookup, and persistence failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Amount must be a positive number")]
    InvalidAmount,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("No expense with id {0}")]
    NotFound(Uuid),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        ExpenseError::Config(err.to_string())
    }
}
