//! Error types for token lookup and precision conversions

use thiserror::Error;

use crate::TokenId;

/// Errors raised while converting between human and base-unit amounts
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrecisionError {
    /// Token is not present in the registry
    #[error("Unknown token: {token}")]
    UnknownToken { token: TokenId },

    /// Human amounts must be non-negative
    #[error("Negative amount: {value}")]
    NegativeAmount { value: String },

    /// Value does not fit the target representation
    #[error("Value overflow: {context}")]
    Overflow { context: String },
}

impl PrecisionError {
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }
}

/// Result type for precision operations
pub type Result<T> = std::result::Result<T, PrecisionError>;
