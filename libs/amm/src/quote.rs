//! Quote value produced by the selector and the inverse solver

use std::fmt;
use tidal_types::TokenId;

use crate::pool_traits::{AmmPool, PoolIndex};

/// Result of a direct or inverse quote
///
/// Built fresh on every call and never mutated; `amount_out` is the best
/// output over every pool listing both tokens for `amount_in`.
pub struct Quote<'a, P> {
    in_token: TokenId,
    out_token: TokenId,
    amount_in: u128,
    amount_out: u128,
    pool: Option<&'a P>,
    expected_amount_out: u128,
}

impl<'a, P: AmmPool> Quote<'a, P> {
    pub(crate) fn new(
        in_token: TokenId,
        out_token: TokenId,
        amount_in: u128,
        best: Option<(&'a P, u128)>,
    ) -> Self {
        let (pool, amount_out) = match best {
            Some((pool, amount_out)) => (Some(pool), amount_out),
            None => (None, 0),
        };
        Self {
            in_token,
            out_token,
            amount_in,
            amount_out,
            pool,
            expected_amount_out: 0,
        }
    }

    /// Same quote carrying the caller's desired output
    pub fn with_expected_amount_out(self, expected_amount_out: u128) -> Self {
        Self {
            expected_amount_out,
            ..self
        }
    }

    pub fn in_token(&self) -> &TokenId {
        &self.in_token
    }

    pub fn out_token(&self) -> &TokenId {
        &self.out_token
    }

    pub fn amount_in(&self) -> u128 {
        self.amount_in
    }

    pub fn amount_out(&self) -> u128 {
        self.amount_out
    }

    /// Winning pool, absent when no pool could serve the trade
    pub fn pool(&self) -> Option<&'a P> {
        self.pool
    }

    /// Desired output of an inverse quote, zero for direct quotes
    pub fn expected_amount_out(&self) -> u128 {
        self.expected_amount_out
    }

    pub fn pool_index(&self) -> Option<PoolIndex> {
        self.pool.map(|pool| pool.index())
    }

    pub fn has_liquidity(&self) -> bool {
        self.pool.is_some()
    }

    /// Whether this quote was computed for the given direction
    pub fn is_for(&self, in_token: &TokenId, out_token: &TokenId) -> bool {
        &self.in_token == in_token && &self.out_token == out_token
    }
}

// Manual impls avoid a `P: Clone` bound on a borrowed pool
impl<P> Clone for Quote<'_, P> {
    fn clone(&self) -> Self {
        Self {
            in_token: self.in_token.clone(),
            out_token: self.out_token.clone(),
            amount_in: self.amount_in,
            amount_out: self.amount_out,
            pool: self.pool,
            expected_amount_out: self.expected_amount_out,
        }
    }
}

impl<P: AmmPool> fmt::Debug for Quote<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quote")
            .field("in_token", &self.in_token)
            .field("out_token", &self.out_token)
            .field("amount_in", &self.amount_in)
            .field("amount_out", &self.amount_out)
            .field("pool", &self.pool_index())
            .field("expected_amount_out", &self.expected_amount_out)
            .finish()
    }
}

impl<P: AmmPool> PartialEq for Quote<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.in_token == other.in_token
            && self.out_token == other.out_token
            && self.amount_in == other.amount_in
            && self.amount_out == other.amount_out
            && self.pool_index() == other.pool_index()
            && self.expected_amount_out == other.expected_amount_out
    }
}

impl<P: AmmPool> Eq for Quote<'_, P> {}
