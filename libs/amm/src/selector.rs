//! Best single-pool selection for a fixed input amount

use tidal_types::TokenId;
use tracing::trace;

use crate::pool_traits::AmmPool;
use crate::quote::Quote;

/// Rule deciding whether an equal output displaces the current best pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Strict `>`: the earliest pool in iteration order keeps a tie
    #[default]
    FirstWins,
    /// `>=`: the latest pool in iteration order takes a tie
    LastWins,
}

impl TieBreak {
    /// Whether `candidate` replaces the incumbent `best` output
    pub fn replaces(self, candidate: u128, best: u128) -> bool {
        match self {
            TieBreak::FirstWins => candidate > best,
            TieBreak::LastWins => candidate >= best,
        }
    }
}

/// Scans a pool snapshot for the best output on one token pair
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectQuoteSelector {
    tie_break: TieBreak,
}

impl DirectQuoteSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Best output over every pool listing both tokens
    ///
    /// Pools are visited in slice order; pools missing either token are not
    /// evaluated. A pool must produce a positive output to win, so an empty
    /// snapshot, a zero input or an unserved pair all yield a quote with
    /// `amount_out == 0` and no pool.
    pub fn select_best<'a, P: AmmPool>(
        &self,
        pools: &'a [P],
        in_token: &TokenId,
        out_token: &TokenId,
        amount_in: u128,
    ) -> Quote<'a, P> {
        let best = pools
            .iter()
            .filter(|pool| pool.contains_pair(in_token, out_token))
            .filter_map(|pool| {
                let amount_out = pool.get_amount_out(in_token, out_token, amount_in);
                trace!(pool = %pool.index(), amount_in = %amount_in, ?amount_out, "Evaluated pool");
                amount_out.map(|amount_out| (pool, amount_out))
            })
            .fold(None, |best: Option<(&'a P, u128)>, (pool, amount_out)| {
                let best_out = best.map_or(0, |(_, out)| out);
                if amount_out > 0 && self.tie_break.replaces(amount_out, best_out) {
                    Some((pool, amount_out))
                } else {
                    best
                }
            });

        Quote::new(in_token.clone(), out_token.clone(), amount_in, best)
    }
}
