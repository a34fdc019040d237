//! USD reference prices for price impact

use rust_decimal::Decimal;
use std::collections::HashMap;
use tidal_amm::ReferenceValue;
use tidal_types::precision::from_base_units;
use tidal_types::TokenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PriceEntry {
    decimals: u8,
    price_usd: Decimal,
}

/// USD price per whole token, with the decimals needed to value base units
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    entries: HashMap<TokenId, PriceEntry>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: TokenId, decimals: u8, price_usd: Decimal) {
        self.entries.insert(token, PriceEntry { decimals, price_usd });
    }

    pub fn price(&self, token: &TokenId) -> Option<Decimal> {
        self.entries.get(token).map(|entry| entry.price_usd)
    }

    pub fn contains(&self, token: &TokenId) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceValue for PriceTable {
    fn reference_value(&self, token: &TokenId, amount: u128) -> Option<Decimal> {
        let entry = self.entries.get(token)?;
        let human = from_base_units(amount, entry.decimals).ok()?;
        human.checked_mul(entry.price_usd)
    }
}
