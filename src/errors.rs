use rust_decimal::Decimal;
use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),
    #[error("Not found: {0}")]
    NotFound(String),
}
