//! Errors raised by the caller layer

use thiserror::Error;
use tidal_types::{PrecisionError, TokenId};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoterError {
    #[error("Cannot swap {token} for itself")]
    SameToken { token: TokenId },

    #[error("Token {token} is not in the snapshot")]
    UnknownToken { token: TokenId },

    #[error(transparent)]
    Precision(#[from] PrecisionError),
}

pub type Result<T> = std::result::Result<T, QuoterError>;
