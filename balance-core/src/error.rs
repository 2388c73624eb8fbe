//! Core error types for Balance.

use thiserror::Error;

/// Core error type for Balance operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Currency code is not a three-letter ISO 4217 code.
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
