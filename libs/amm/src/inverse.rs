//! Inverse quoting: the input needed to reach a desired output
//!
//! Binary search over candidate inputs, re-running the direct selector at
//! each probe. The best output across pools is non-decreasing in the input
//! whenever every pool's quote is, which is what makes the search valid.

use tidal_types::TokenId;
use tracing::debug;

use crate::pool_traits::AmmPool;
use crate::quote::Quote;
use crate::selector::DirectQuoteSelector;

/// Fixed probe count; converges to a single base unit on domains up to 2^60
pub const INVERSE_SEARCH_ITERATIONS: u32 = 60;

/// Solves for the input amount that achieves a target output
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseQuoteSolver {
    selector: DirectQuoteSelector,
}

impl InverseQuoteSolver {
    pub fn new(selector: DirectQuoteSelector) -> Self {
        Self { selector }
    }

    pub fn selector(&self) -> &DirectQuoteSelector {
        &self.selector
    }

    /// Quote for the smallest input on `[0, max_available_in]` whose best
    /// output strictly exceeds `desired_out`
    ///
    /// Always runs [`INVERSE_SEARCH_ITERATIONS`] probes. When no probe beats
    /// the target, the quote is taken at the final upper bound instead. The
    /// returned quote carries `desired_out` as its expected output either way.
    pub fn solve_for_output<'a, P: AmmPool>(
        &self,
        pools: &'a [P],
        in_token: &TokenId,
        out_token: &TokenId,
        max_available_in: u128,
        desired_out: u128,
    ) -> Quote<'a, P> {
        let mut left: u128 = 0;
        let mut right = max_available_in;
        let mut best: Option<Quote<'a, P>> = None;

        for _ in 0..INVERSE_SEARCH_ITERATIONS {
            // floor((left + right) / 2) without overflowing u128
            let mid = left + (right - left) / 2;
            let quote = self.selector.select_best(pools, in_token, out_token, mid);

            if quote.amount_out() > desired_out {
                best = Some(quote);
                right = mid;
            } else {
                left = mid;
            }
        }

        let converged = best.is_some();
        let quote = best
            .unwrap_or_else(|| self.selector.select_best(pools, in_token, out_token, right))
            .with_expected_amount_out(desired_out);

        debug!(
            in_token = %in_token,
            out_token = %out_token,
            desired_out = %desired_out,
            amount_in = %quote.amount_in(),
            amount_out = %quote.amount_out(),
            converged,
            "Inverse quote solved"
        );

        quote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant_product::ConstantProductPool;
    use crate::pool_traits::{Pool, PoolIndex};
    use std::cell::Cell;

    fn token(id: &str) -> TokenId {
        TokenId::from(id)
    }

    fn cp_pool(index: u64, reserve_a: u128, reserve_b: u128, fee_bps: u32) -> ConstantProductPool {
        ConstantProductPool::new(
            PoolIndex(index),
            [(token("a"), reserve_a), (token("b"), reserve_b)],
            fee_bps,
        )
        .unwrap()
    }

    /// 1:1 pool counting its evaluations
    struct LinearPool {
        pool: Pool,
        calls: Cell<u32>,
    }

    impl AmmPool for LinearPool {
        fn pool(&self) -> &Pool {
            &self.pool
        }

        fn get_amount_out(&self, _: &TokenId, _: &TokenId, amount_in: u128) -> Option<u128> {
            self.calls.set(self.calls.get() + 1);
            Some(amount_in)
        }
    }

    #[test]
    fn test_finds_smallest_input_beating_target() {
        let pools = vec![cp_pool(0, 1000, 1000, 30)];
        let quote = InverseQuoteSolver::default().solve_for_output(
            &pools,
            &token("a"),
            &token("b"),
            10_000,
            90,
        );

        let selector = DirectQuoteSelector::new();
        let below = selector.select_best(&pools, &token("a"), &token("b"), quote.amount_in() - 1);
        assert!(quote.amount_out() > 90);
        assert!(below.amount_out() <= 90);
        assert_eq!(quote.expected_amount_out(), 90);
    }

    #[test]
    fn test_matches_closed_form_inverse() {
        let pools = vec![cp_pool(0, 5_000_000, 9_000_000, 30), cp_pool(1, 2_000_000, 4_100_000, 5)];
        let solver = InverseQuoteSolver::default();

        let desired = 250_000;
        let quote = solver.solve_for_output(&pools, &token("a"), &token("b"), 50_000_000, desired);

        // Strict comparison: the answer reaches desired + 1 at the winning pool
        let winner = quote.pool().unwrap();
        let closed_form = winner.amount_in_for(&token("a"), &token("b"), desired + 1).unwrap();
        let other = pools.iter().find(|p| p.index() != winner.index()).unwrap();
        let other_form = other.amount_in_for(&token("a"), &token("b"), desired + 1).unwrap();

        assert_eq!(quote.amount_in(), closed_form.min(other_form));
    }

    #[test]
    fn test_unreachable_target_falls_back_to_upper_bound() {
        let pools = vec![cp_pool(0, 1000, 1000, 30)];
        let quote = InverseQuoteSolver::default().solve_for_output(
            &pools,
            &token("a"),
            &token("b"),
            100,
            500,
        );

        assert_eq!(quote.amount_in(), 100);
        assert_eq!(quote.amount_out(), 90);
        assert_eq!(quote.expected_amount_out(), 500);
    }

    #[test]
    fn test_zero_available_input() {
        let pools = vec![cp_pool(0, 1000, 1000, 30)];
        let quote =
            InverseQuoteSolver::default().solve_for_output(&pools, &token("a"), &token("b"), 0, 10);

        assert_eq!(quote.amount_in(), 0);
        assert_eq!(quote.amount_out(), 0);
        assert!(quote.pool().is_none());
        assert_eq!(quote.expected_amount_out(), 10);
    }

    #[test]
    fn test_zero_target_keeps_strict_comparison() {
        // 1:1 pricing: the smallest input with output > 0 is 1
        let pools = vec![LinearPool {
            pool: Pool::new(PoolIndex(0), [(token("a"), 1), (token("b"), 1)]),
            calls: Cell::new(0),
        }];
        let quote =
            InverseQuoteSolver::default().solve_for_output(&pools, &token("a"), &token("b"), 1_000, 0);

        assert_eq!(quote.amount_in(), 1);
        assert_eq!(quote.amount_out(), 1);
        assert_eq!(quote.expected_amount_out(), 0);
    }

    #[test]
    fn test_runs_fixed_iteration_count() {
        let pools = vec![LinearPool {
            pool: Pool::new(PoolIndex(0), [(token("a"), 1), (token("b"), 1)]),
            calls: Cell::new(0),
        }];

        // Reachable target: exactly one probe per iteration
        InverseQuoteSolver::default().solve_for_output(&pools, &token("a"), &token("b"), 1 << 40, 77);
        assert_eq!(pools[0].calls.get(), INVERSE_SEARCH_ITERATIONS);

        // Unreachable target adds the fallback probe
        pools[0].calls.set(0);
        InverseQuoteSolver::default().solve_for_output(&pools, &token("a"), &token("b"), 10, 77);
        assert_eq!(pools[0].calls.get(), INVERSE_SEARCH_ITERATIONS + 1);
    }

    #[test]
    fn test_linear_pool_converges_exactly() {
        let pools = vec![LinearPool {
            pool: Pool::new(PoolIndex(0), [(token("a"), 1), (token("b"), 1)]),
            calls: Cell::new(0),
        }];
        let max_in = 1u128 << 50;
        let quote = InverseQuoteSolver::default().solve_for_output(
            &pools,
            &token("a"),
            &token("b"),
            max_in,
            123_456_789_012,
        );
        assert_eq!(quote.amount_in(), 123_456_789_013);
    }
}
