//! In-memory market state the quoter works against
//!
//! One immutable snapshot per quote: pools, token metadata, reference
//! prices and the caller's balances.

use std::collections::{BTreeSet, HashMap};
use tidal_amm::ConstantProductPool;
use tidal_types::{TokenId, TokenRegistry};

use crate::prices::PriceTable;

/// Caller balances per token, one entry per holding source
#[derive(Debug, Clone, Default)]
pub struct Balances {
    sources: HashMap<TokenId, Vec<u128>>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a balance held in one more source (wallet, exchange deposit, ...)
    pub fn add_source(&mut self, token: TokenId, amount: u128) {
        self.sources.entry(token).or_default().push(amount);
    }

    /// Sum over every source, zero for tokens never seen
    pub fn available(&self, token: &TokenId) -> u128 {
        self.sources
            .get(token)
            .map(|amounts| amounts.iter().fold(0u128, |sum, amount| sum.saturating_add(*amount)))
            .unwrap_or(0)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &TokenId> {
        self.sources.keys()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pub pools: Vec<ConstantProductPool>,
    pub registry: TokenRegistry,
    pub prices: PriceTable,
    pub balances: Balances,
}

impl MarketSnapshot {
    /// Tokens offered for trading, sorted by id
    ///
    /// Candidates are every registered or held token; a candidate is kept
    /// when it has a reference price or is the wrapped native token.
    pub fn tradable_tokens(&self, wrap_near_token: &TokenId) -> Vec<TokenId> {
        let candidates: BTreeSet<&TokenId> = self
            .registry
            .iter()
            .map(|metadata| &metadata.id)
            .chain(self.balances.tokens())
            .collect();

        candidates
            .into_iter()
            .filter(|token| *token == wrap_near_token || self.prices.contains(token))
            .cloned()
            .collect()
    }
}
