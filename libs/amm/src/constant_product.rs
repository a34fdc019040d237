//! Constant product (x*y=k) pool math with exact integer calculations
//!
//! Amounts are base units. Intermediate products are widened to 512 bits so
//! no reserve/amount combination can overflow, and every division floors,
//! which keeps the output non-decreasing in the input.

use primitive_types::{U256, U512};
use tidal_types::TokenId;

use crate::error::{AmmError, Result};
use crate::pool_traits::{AmmPool, Pool, PoolIndex};

/// Fee divisor: fees are expressed in basis points of this
pub const FEE_DIVISOR: u32 = 10_000;

/// Constant product pool over two or more tokens, priced pairwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    pool: Pool,
    fee_bps: u32, // Total fee in basis points (30 = 0.3%)
}

impl ConstantProductPool {
    pub fn new(
        index: PoolIndex,
        tokens: impl IntoIterator<Item = (TokenId, u128)>,
        fee_bps: u32,
    ) -> Result<Self> {
        let pool = Pool::new(index, tokens);
        if pool.tokens.len() < 2 {
            return Err(AmmError::TooFewTokens {
                index,
                count: pool.tokens.len(),
            });
        }
        if fee_bps > FEE_DIVISOR {
            return Err(AmmError::InvalidFee {
                index,
                fee_bps,
                max_bps: FEE_DIVISOR,
            });
        }
        Ok(Self { pool, fee_bps })
    }

    pub fn fee_bps(&self) -> u32 {
        self.fee_bps
    }

    /// Reserves for a distinct, non-empty token pair
    fn pair_reserves(&self, token_in: &TokenId, token_out: &TokenId) -> Option<(u128, u128)> {
        if token_in == token_out {
            return None;
        }
        let reserve_in = self.pool.reserve(token_in)?;
        let reserve_out = self.pool.reserve(token_out)?;
        if reserve_in == 0 || reserve_out == 0 {
            return None;
        }
        Some((reserve_in, reserve_out))
    }

    /// Smallest input whose output reaches `amount_out`
    ///
    /// Closed-form inverse of [`calculate_output_amount`], rounded up.
    /// `None` when the output would drain the pool or the fee is 100%.
    pub fn amount_in_for(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_out: u128,
    ) -> Option<u128> {
        let (reserve_in, reserve_out) = self.pair_reserves(token_in, token_out)?;
        calculate_input_amount(amount_out, reserve_in, reserve_out, self.fee_bps)
    }
}

impl AmmPool for ConstantProductPool {
    fn pool(&self) -> &Pool {
        &self.pool
    }

    fn get_amount_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: u128,
    ) -> Option<u128> {
        let (reserve_in, reserve_out) = self.pair_reserves(token_in, token_out)?;
        Some(calculate_output_amount(
            amount_in,
            reserve_in,
            reserve_out,
            self.fee_bps,
        ))
    }
}

/// Exact output for a constant product swap
///
/// `out = in*(D-fee)*R_out / (D*R_in + in*(D-fee))`, floored, `D = 10_000`.
/// Callers guarantee non-zero reserves and `fee_bps <= D`.
pub fn calculate_output_amount(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u32,
) -> u128 {
    let amount_with_fee = U256::from(amount_in) * U256::from(FEE_DIVISOR - fee_bps);
    let numerator = amount_with_fee.full_mul(U256::from(reserve_out));
    let denominator = U256::from(reserve_in) * U256::from(FEE_DIVISOR) + amount_with_fee;

    // quotient < reserve_out, so the low 128 bits hold it entirely
    (numerator / U512::from(denominator)).low_u128()
}

/// Required input for a desired output (reverse calculation), rounded up
pub fn calculate_input_amount(
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_bps: u32,
) -> Option<u128> {
    if amount_out >= reserve_out || fee_bps >= FEE_DIVISOR {
        return None;
    }

    let numerator = (U256::from(reserve_in) * U256::from(FEE_DIVISOR))
        .full_mul(U256::from(amount_out));
    let denominator = U512::from(
        U256::from(reserve_out - amount_out) * U256::from(FEE_DIVISOR - fee_bps),
    );

    let amount_in = (numerator + denominator - U512::one()) / denominator;
    if amount_in > U512::from(u128::MAX) {
        return None;
    }
    Some(amount_in.low_u128())
}
