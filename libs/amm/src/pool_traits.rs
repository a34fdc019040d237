//! Pool snapshot and the quote capability every pool protocol implements

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tidal_types::TokenId;

/// Stable pool identifier assigned by the liquidity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolIndex(pub u64);

impl fmt::Display for PoolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only pool snapshot: identifier plus per-token balances in base units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub index: PoolIndex,
    pub tokens: BTreeMap<TokenId, u128>,
}

impl Pool {
    pub fn new(index: PoolIndex, tokens: impl IntoIterator<Item = (TokenId, u128)>) -> Self {
        Self {
            index,
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn reserve(&self, token: &TokenId) -> Option<u128> {
        self.tokens.get(token).copied()
    }

    pub fn contains(&self, token: &TokenId) -> bool {
        self.tokens.contains_key(token)
    }
}

/// Quote capability implemented per pool protocol
///
/// `get_amount_out` must be pure and non-decreasing in `amount_in` for a
/// fixed snapshot and token pair; the inverse solver's binary search relies
/// on it.
pub trait AmmPool {
    /// Balances and identity of this pool
    fn pool(&self) -> &Pool;

    /// Output for trading `amount_in` of `token_in`, `None` if the pool cannot serve it
    fn get_amount_out(&self, token_in: &TokenId, token_out: &TokenId, amount_in: u128)
        -> Option<u128>;

    fn index(&self) -> PoolIndex {
        self.pool().index
    }

    fn reserve(&self, token: &TokenId) -> Option<u128> {
        self.pool().reserve(token)
    }

    /// Whether both tokens are listed in this pool
    fn contains_pair(&self, token_a: &TokenId, token_b: &TokenId) -> bool {
        let pool = self.pool();
        pool.contains(token_a) && pool.contains(token_b)
    }
}

impl<T: AmmPool + ?Sized> AmmPool for Box<T> {
    fn pool(&self) -> &Pool {
        (**self).pool()
    }

    fn get_amount_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: u128,
    ) -> Option<u128> {
        (**self).get_amount_out(token_in, token_out, amount_in)
    }
}
