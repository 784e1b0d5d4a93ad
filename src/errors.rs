use std::io;

use rust_decimal::Decimal;
use thiserror::Error;

/// Input that would break the ledger invariants. Nothing is mutated when one
/// of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("amount must not exceed 9999999999999.99 (got {0})")]
    AmountTooLarge(Decimal),
    #[error("amount must have at most two decimal places (got {0})")]
    TooManyDecimals(Decimal),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("invalid date `{0}` (use YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("invalid month `{0}` (use YYYY-MM or `all`)")]
    InvalidMonthKey(String),
}

/// Failures reading from or writing to the backing key-value store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Error type returned by every ledger operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}
