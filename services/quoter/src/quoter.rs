//! Swap quoting against a market snapshot
//!
//! Turns a typed amount into a clamped base-unit request, runs the direct
//! or inverse quote, and packages the result for display. Every amount the
//! caller sees is rounded toward zero.

use rust_decimal::Decimal;
use serde::Serialize;
use tidal_amm::{
    AmmPool, ConstantProductPool, DirectQuoteSelector, ImpactSeverity, ImpactThresholds,
    InverseQuoteSolver, PoolIndex, PriceImpact, PriceImpactEvaluator, Quote,
};
use tidal_config::QuoterConfig;
use tidal_types::precision::{from_base_units, round_display, to_base_units};
use tidal_types::{TokenId, U128};
use tracing::debug;

use crate::error::{QuoterError, Result};
use crate::market::MarketSnapshot;

/// Which side of the swap the caller typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRequest {
    /// Spend this many whole input tokens
    ExactInput(Decimal),
    /// Receive this many whole output tokens
    ExactOutput(Decimal),
}

/// Pool serving the max quote, with balances in whole tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolDetails {
    pub index: PoolIndex,
    pub fee_bps: u32,
    pub in_token_liquidity: Decimal,
    pub out_token_liquidity: Decimal,
    pub rate: Option<Decimal>,
    pub inverse_rate: Option<Decimal>,
}

/// A resolved swap ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapOutcome {
    pub in_token: TokenId,
    pub out_token: TokenId,
    pub amount_in: U128,
    pub amount_out: U128,
    pub expected_amount_out: U128,
    pub amount_in_human: Decimal,
    pub amount_out_human: Decimal,
    pub available_in: U128,
    pub available_in_human: Decimal,
    pub max_amount_out: U128,
    pub max_amount_out_human: Decimal,
    pub pool: Option<PoolIndex>,
    pub rate: Option<Decimal>,
    pub inverse_rate: Option<Decimal>,
    pub pool_details: Option<PoolDetails>,
    pub price_impact: Option<PriceImpact>,
    pub severity: Option<ImpactSeverity>,
}

pub struct SwapQuoter<'a> {
    market: &'a MarketSnapshot,
    solver: InverseQuoteSolver,
    thresholds: ImpactThresholds,
    decimal_places: u32,
}

impl<'a> SwapQuoter<'a> {
    pub fn new(market: &'a MarketSnapshot, config: &QuoterConfig) -> Self {
        Self {
            market,
            solver: InverseQuoteSolver::default(),
            thresholds: config.price_impact.thresholds(),
            decimal_places: config.display.decimal_places,
        }
    }

    /// Replace the pool selector (and with it the tie-break rule)
    pub fn with_selector(mut self, selector: DirectQuoteSelector) -> Self {
        self.solver = InverseQuoteSolver::new(selector);
        self
    }

    pub fn market(&self) -> &'a MarketSnapshot {
        self.market
    }

    fn selector(&self) -> &DirectQuoteSelector {
        self.solver.selector()
    }

    fn check_pair(&self, in_token: &TokenId, out_token: &TokenId) -> Result<()> {
        if in_token == out_token {
            return Err(QuoterError::SameToken {
                token: in_token.clone(),
            });
        }
        for token in [in_token, out_token] {
            if !self.market.registry.contains(token) {
                return Err(QuoterError::UnknownToken {
                    token: token.clone(),
                });
            }
        }
        Ok(())
    }

    fn decimals(&self, token: &TokenId) -> Result<u8> {
        Ok(self.market.registry.decimals(token)?)
    }

    fn human(&self, token: &TokenId, amount: u128) -> Result<Decimal> {
        let value = from_base_units(amount, self.decimals(token)?)?;
        Ok(round_display(value, self.decimal_places))
    }

    /// Sum of the caller's balances of `token`
    pub fn available(&self, token: &TokenId) -> u128 {
        self.market.balances.available(token)
    }

    /// Direct quote spending the full available input
    pub fn max_quote(
        &self,
        in_token: &TokenId,
        out_token: &TokenId,
    ) -> Result<Quote<'a, ConstantProductPool>> {
        self.check_pair(in_token, out_token)?;
        Ok(self.selector().select_best(
            &self.market.pools,
            in_token,
            out_token,
            self.available(in_token),
        ))
    }

    /// Typed input amount in base units, capped at the available balance
    pub fn clamp_input(&self, in_token: &TokenId, human: Decimal) -> Result<u128> {
        let requested = to_base_units(human, self.decimals(in_token)?)?;
        Ok(requested.min(self.available(in_token)))
    }

    /// Typed output amount in base units, capped at the max quote's output
    pub fn clamp_output(
        &self,
        in_token: &TokenId,
        out_token: &TokenId,
        human: Decimal,
    ) -> Result<u128> {
        let max_quote = self.max_quote(in_token, out_token)?;
        self.clamp_output_to(&max_quote, human)
    }

    fn clamp_output_to(
        &self,
        max_quote: &Quote<'a, ConstantProductPool>,
        human: Decimal,
    ) -> Result<u128> {
        let requested = to_base_units(human, self.decimals(max_quote.out_token())?)?;
        Ok(requested.min(max_quote.amount_out()))
    }

    /// Resolve a swap request into a displayable outcome
    pub fn quote(
        &self,
        in_token: &TokenId,
        out_token: &TokenId,
        request: SwapRequest,
    ) -> Result<SwapOutcome> {
        let max_quote = self.max_quote(in_token, out_token)?;
        let available_in = self.available(in_token);

        let quote = match request {
            SwapRequest::ExactInput(human) => {
                let amount_in = self.clamp_input(in_token, human)?;
                self.selector()
                    .select_best(&self.market.pools, in_token, out_token, amount_in)
            }
            SwapRequest::ExactOutput(human) => {
                let desired_out = self.clamp_output_to(&max_quote, human)?;
                self.solver.solve_for_output(
                    &self.market.pools,
                    in_token,
                    out_token,
                    available_in,
                    desired_out,
                )
            }
        };

        debug!(
            ?request,
            pool = ?quote.pool_index(),
            amount_in = %quote.amount_in(),
            amount_out = %quote.amount_out(),
            "Swap quoted"
        );

        self.outcome(&quote, &max_quote, available_in)
    }

    /// Outcome of spending the whole available balance
    pub fn max_swap(&self, in_token: &TokenId, out_token: &TokenId) -> Result<SwapOutcome> {
        let max_quote = self.max_quote(in_token, out_token)?;
        self.outcome(&max_quote, &max_quote, self.available(in_token))
    }

    fn outcome(
        &self,
        quote: &Quote<'a, ConstantProductPool>,
        max_quote: &Quote<'a, ConstantProductPool>,
        available_in: u128,
    ) -> Result<SwapOutcome> {
        let in_token = quote.in_token();
        let out_token = quote.out_token();

        let amount_in_human = self.human(in_token, quote.amount_in())?;
        let amount_out_human = self.human(out_token, quote.amount_out())?;

        let (rate, inverse_rate) = match quote.pool() {
            Some(_) => self.rates(in_token, quote.amount_in(), out_token, quote.amount_out())?,
            None => (None, None),
        };

        let price_impact = match (quote.pool(), max_quote.pool()) {
            (Some(_), Some(_)) => Some(PriceImpactEvaluator::evaluate(quote, &self.market.prices)),
            _ => None,
        };

        let pool_details = max_quote
            .pool()
            .map(|pool| self.pool_details(pool, in_token, out_token))
            .transpose()?;

        Ok(SwapOutcome {
            in_token: in_token.clone(),
            out_token: out_token.clone(),
            amount_in: quote.amount_in().into(),
            amount_out: quote.amount_out().into(),
            expected_amount_out: quote.expected_amount_out().into(),
            amount_in_human,
            amount_out_human,
            available_in: available_in.into(),
            available_in_human: self.human(in_token, available_in)?,
            max_amount_out: max_quote.amount_out().into(),
            max_amount_out_human: self.human(out_token, max_quote.amount_out())?,
            pool: quote.pool_index(),
            rate,
            inverse_rate,
            pool_details,
            severity: price_impact.map(|impact| impact.severity(&self.thresholds)),
            price_impact,
        })
    }

    /// Output per unit of input and its inverse, in whole tokens
    fn rates(
        &self,
        in_token: &TokenId,
        amount_in: u128,
        out_token: &TokenId,
        amount_out: u128,
    ) -> Result<(Option<Decimal>, Option<Decimal>)> {
        let human_in = from_base_units(amount_in, self.decimals(in_token)?)?;
        let human_out = from_base_units(amount_out, self.decimals(out_token)?)?;

        let ratio = |numerator: Decimal, denominator: Decimal| {
            numerator
                .checked_div(denominator)
                .map(|rate| round_display(rate, self.decimal_places))
        };
        Ok((ratio(human_out, human_in), ratio(human_in, human_out)))
    }

    fn pool_details(
        &self,
        pool: &ConstantProductPool,
        in_token: &TokenId,
        out_token: &TokenId,
    ) -> Result<PoolDetails> {
        let reserve_in = pool.reserve(in_token).unwrap_or(0);
        let reserve_out = pool.reserve(out_token).unwrap_or(0);
        let (rate, inverse_rate) = self.rates(in_token, reserve_in, out_token, reserve_out)?;

        Ok(PoolDetails {
            index: pool.index(),
            fee_bps: pool.fee_bps(),
            in_token_liquidity: self.human(in_token, reserve_in)?,
            out_token_liquidity: self.human(out_token, reserve_out)?,
            rate,
            inverse_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prices::PriceTable;
    use rust_decimal_macros::dec;
    use tidal_types::TokenMetadata;

    fn token(id: &str) -> TokenId {
        TokenId::from(id)
    }

    /// Two 0-decimal tokens priced at $1, one 1000/1000 pool at 30 bps
    fn market(balance_a: u128) -> MarketSnapshot {
        let mut prices = PriceTable::new();
        prices.insert(token("a"), 0, dec!(1));
        prices.insert(token("b"), 0, dec!(1));

        let mut market = MarketSnapshot {
            pools: vec![ConstantProductPool::new(
                PoolIndex(7),
                [(token("a"), 1000), (token("b"), 1000)],
                30,
            )
            .unwrap()],
            registry: [
                TokenMetadata::new("a", "A", 0),
                TokenMetadata::new("b", "B", 0),
                TokenMetadata::new("c", "C", 0),
            ]
            .into_iter()
            .collect(),
            prices,
            ..MarketSnapshot::default()
        };
        market.balances.add_source(token("a"), balance_a);
        market
    }

    #[test]
    fn test_exact_input_matches_direct_quote() {
        let market = market(500);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactInput(dec!(100)))
            .unwrap();

        assert_eq!(outcome.amount_in, U128(100));
        assert_eq!(outcome.amount_out, U128(90));
        assert_eq!(outcome.amount_out_human, dec!(90));
        assert_eq!(outcome.expected_amount_out, U128(0));
        assert_eq!(outcome.pool, Some(PoolIndex(7)));
        assert_eq!(outcome.rate, Some(dec!(0.9)));
        assert_eq!(outcome.inverse_rate, Some(dec!(1.111111)));
    }

    #[test]
    fn test_exact_input_is_clamped_to_balance() {
        let market = market(50);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactInput(dec!(100)))
            .unwrap();
        assert_eq!(outcome.amount_in, U128(50));
        assert_eq!(outcome.available_in, U128(50));
    }

    #[test]
    fn test_exact_output_is_clamped_to_max_quote() {
        let market = market(100);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        // Max quote: 100 in -> 90 out, so asking for 500 targets 90
        let outcome = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactOutput(dec!(500)))
            .unwrap();
        assert_eq!(outcome.max_amount_out, U128(90));
        assert_eq!(outcome.expected_amount_out, U128(90));
        // No input beats 90 within the balance, so the solver falls back to all of it
        assert_eq!(outcome.amount_in, U128(100));
        assert_eq!(outcome.amount_out, U128(90));
    }

    #[test]
    fn test_exact_output_finds_minimal_input() {
        let market = market(1_000);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactOutput(dec!(40)))
            .unwrap();
        let amount_in = u128::from(outcome.amount_in);
        assert!(u128::from(outcome.amount_out) > 40);

        let below = quoter
            .quote(
                &token("a"),
                &token("b"),
                SwapRequest::ExactInput(Decimal::from(amount_in as u64 - 1)),
            )
            .unwrap();
        assert!(u128::from(below.amount_out) <= 40);
    }

    #[test]
    fn test_price_impact_and_severity() {
        let market = market(1_000);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactInput(dec!(100)))
            .unwrap();
        let impact = outcome.price_impact.unwrap();
        assert_eq!(impact.fraction, dec!(-0.1));
        assert_eq!(impact.absolute, dec!(-10));
        assert_eq!(outcome.severity, Some(ImpactSeverity::Danger));
    }

    #[test]
    fn test_no_impact_without_max_pool() {
        // Nothing to spend: the max quote has no pool
        let market = market(0);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactInput(dec!(100)))
            .unwrap();
        assert_eq!(outcome.amount_in, U128(0));
        assert_eq!(outcome.pool, None);
        assert_eq!(outcome.price_impact, None);
        assert_eq!(outcome.severity, None);
        assert_eq!(outcome.pool_details, None);
        assert_eq!(outcome.rate, None);
    }

    #[test]
    fn test_max_swap_reports_pool_details() {
        let market = market(100);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter.max_swap(&token("a"), &token("b")).unwrap();
        assert_eq!(outcome.amount_in, U128(100));
        assert_eq!(outcome.amount_out, U128(90));

        let details = outcome.pool_details.unwrap();
        assert_eq!(details.index, PoolIndex(7));
        assert_eq!(details.fee_bps, 30);
        assert_eq!(details.in_token_liquidity, dec!(1000));
        assert_eq!(details.out_token_liquidity, dec!(1000));
        assert_eq!(details.rate, Some(dec!(1)));
    }

    #[test]
    fn test_rejects_invalid_pairs() {
        let market = market(100);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        assert_eq!(
            quoter.max_quote(&token("a"), &token("a")).unwrap_err(),
            QuoterError::SameToken { token: token("a") }
        );
        assert_eq!(
            quoter.max_quote(&token("a"), &token("zzz")).unwrap_err(),
            QuoterError::UnknownToken { token: token("zzz") }
        );
    }

    #[test]
    fn test_unserved_pair_yields_empty_outcome() {
        let market = market(100);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let outcome = quoter
            .quote(&token("a"), &token("c"), SwapRequest::ExactInput(dec!(10)))
            .unwrap();
        assert_eq!(outcome.amount_out, U128(0));
        assert_eq!(outcome.max_amount_out, U128(0));
        assert_eq!(outcome.pool, None);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let market = market(100);
        let quoter = SwapQuoter::new(&market, &QuoterConfig::default());

        let err = quoter
            .quote(&token("a"), &token("b"), SwapRequest::ExactInput(dec!(-1)))
            .unwrap_err();
        assert!(matches!(err, QuoterError::Precision(_)));
    }
}
