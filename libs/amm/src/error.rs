//! Errors raised while building pool snapshots
//!
//! Quoting itself never fails: missing liquidity is a zero quote. Only
//! constructing a pool from bad provider data is rejected.

use thiserror::Error;

use crate::PoolIndex;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    #[error("Pool {index} lists {count} tokens, at least 2 required")]
    TooFewTokens { index: PoolIndex, count: usize },

    #[error("Pool {index} fee {fee_bps} bps exceeds the {max_bps} bps divisor")]
    InvalidFee {
        index: PoolIndex,
        fee_bps: u32,
        max_bps: u32,
    },
}

pub type Result<T> = std::result::Result<T, AmmError>;
