//! Price impact of a resolved quote against reference token values
//!
//! Compares what goes in and what comes out in a common reference unit
//! (usually USD). A trade with no slippage and no fee scores zero; every
//! loss shows up as a negative fraction.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tidal_types::TokenId;

use crate::pool_traits::AmmPool;
use crate::quote::Quote;

/// Source of reference values for token amounts
pub trait ReferenceValue {
    /// Value of `amount` base units of `token`, `None` when unpriced
    fn reference_value(&self, token: &TokenId, amount: u128) -> Option<Decimal>;
}

impl<F> ReferenceValue for F
where
    F: Fn(&TokenId, u128) -> Option<Decimal>,
{
    fn reference_value(&self, token: &TokenId, amount: u128) -> Option<Decimal> {
        self(token, amount)
    }
}

/// Value loss relative to a reference-price exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriceImpact {
    /// `output / input - 1`, zero when the input is unpriced
    pub fraction: Decimal,
    /// `output - input` in the reference unit
    pub absolute: Decimal,
}

impl PriceImpact {
    pub fn percent(&self) -> Decimal {
        self.fraction * dec!(100)
    }

    pub fn severity(&self, thresholds: &ImpactThresholds) -> ImpactSeverity {
        if self.fraction < thresholds.danger {
            ImpactSeverity::Danger
        } else if self.fraction < thresholds.warning {
            ImpactSeverity::Warning
        } else {
            ImpactSeverity::Normal
        }
    }
}

/// Fractions below which an impact is flagged (both negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactThresholds {
    pub warning: Decimal,
    pub danger: Decimal,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            warning: dec!(-0.005), // -0.5%
            danger: dec!(-0.02),   // -2%
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactSeverity {
    Normal,
    Warning,
    Danger,
}

/// Computes [`PriceImpact`] for quotes
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceImpactEvaluator;

impl PriceImpactEvaluator {
    /// Impact of `quote`, `(0, 0)` when no pool served it
    pub fn evaluate<P: AmmPool, R: ReferenceValue + ?Sized>(
        quote: &Quote<'_, P>,
        reference: &R,
    ) -> PriceImpact {
        if quote.pool().is_none() {
            return PriceImpact::default();
        }

        let input_value = reference
            .reference_value(quote.in_token(), quote.amount_in())
            .unwrap_or(Decimal::ZERO);
        let output_value = reference
            .reference_value(quote.out_token(), quote.amount_out())
            .unwrap_or(Decimal::ZERO);

        let fraction = if input_value > Decimal::ZERO {
            output_value / input_value - Decimal::ONE
        } else {
            Decimal::ZERO
        };

        PriceImpact {
            fraction,
            absolute: output_value - input_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant_product::ConstantProductPool;
    use crate::pool_traits::PoolIndex;
    use crate::selector::DirectQuoteSelector;

    fn token(id: &str) -> TokenId {
        TokenId::from(id)
    }

    fn pools() -> Vec<ConstantProductPool> {
        vec![ConstantProductPool::new(
            PoolIndex(0),
            [(token("a"), 1000), (token("b"), 1000)],
            30,
        )
        .unwrap()]
    }

    fn one_dollar_each(_: &TokenId, amount: u128) -> Option<Decimal> {
        Some(Decimal::from(amount as u64))
    }

    #[test]
    fn test_loss_is_negative() {
        let pools = pools();
        let quote = DirectQuoteSelector::new().select_best(&pools, &token("a"), &token("b"), 100);

        let impact = PriceImpactEvaluator::evaluate(&quote, &one_dollar_each);
        assert_eq!(impact.fraction, dec!(-0.1));
        assert_eq!(impact.absolute, dec!(-10));
        assert_eq!(impact.percent(), dec!(-10));
        assert!(impact.fraction < Decimal::ZERO);
    }

    #[test]
    fn test_equal_values_have_zero_impact() {
        let pools = pools();
        let quote = DirectQuoteSelector::new().select_best(&pools, &token("a"), &token("b"), 100);

        let flat = |_: &TokenId, _: u128| Some(dec!(25));
        let impact = PriceImpactEvaluator::evaluate(&quote, &flat);
        assert_eq!(impact.fraction, Decimal::ZERO);
        assert_eq!(impact.absolute, Decimal::ZERO);
    }

    #[test]
    fn test_no_pool_means_no_impact() {
        let pools = pools();
        let quote = DirectQuoteSelector::new().select_best(&pools, &token("a"), &token("c"), 100);

        let impact = PriceImpactEvaluator::evaluate(&quote, &one_dollar_each);
        assert_eq!(impact, PriceImpact::default());
    }

    #[test]
    fn test_unpriced_input_keeps_absolute_difference() {
        let pools = pools();
        let quote = DirectQuoteSelector::new().select_best(&pools, &token("a"), &token("b"), 100);

        let only_b = |id: &TokenId, amount: u128| {
            (id.as_str() == "b").then(|| Decimal::from(amount as u64) * dec!(2))
        };
        let impact = PriceImpactEvaluator::evaluate(&quote, &only_b);
        assert_eq!(impact.fraction, Decimal::ZERO);
        assert_eq!(impact.absolute, dec!(180));
    }

    #[test]
    fn test_severity_thresholds() {
        let thresholds = ImpactThresholds::default();
        let impact = |fraction| PriceImpact {
            fraction,
            absolute: Decimal::ZERO,
        };

        assert_eq!(impact(dec!(0.01)).severity(&thresholds), ImpactSeverity::Normal);
        assert_eq!(impact(dec!(-0.005)).severity(&thresholds), ImpactSeverity::Normal);
        assert_eq!(impact(dec!(-0.006)).severity(&thresholds), ImpactSeverity::Warning);
        assert_eq!(impact(dec!(-0.02)).severity(&thresholds), ImpactSeverity::Warning);
        assert_eq!(impact(dec!(-0.25)).severity(&thresholds), ImpactSeverity::Danger);
    }
}
