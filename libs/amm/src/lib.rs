//! # Tidal AMM Library - Swap Quote Engine
//!
//! ## Purpose
//!
//! Pure quoting core for trading one token for another through a set of
//! independent AMM pools. Answers which single pool gives the best output for
//! an input ("direct quote"), which input reaches a desired output ("inverse
//! quote"), and how much value the trade loses against reference prices
//! ("price impact").
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool snapshots from the liquidity provider, amounts from the caller
//! - **Output Destinations**: Caller layer (`tidal-quoter`) for display and submission
//! - **Pool Protocols**: Any type implementing [`AmmPool`]; [`ConstantProductPool`] ships here
//! - **Precision**: Base units as `u128`, 512-bit intermediates, no floating point
//!
//! ## Architecture Role
//!
//! ```text
//! Pool Snapshot + Amounts → [DirectQuoteSelector] → Quote
//!                                 ↑         ↓
//!                     [InverseQuoteSolver]  [PriceImpactEvaluator] → PriceImpact
//!                     (60 selector passes)   (reference values)
//! ```
//!
//! Every component is a pure function over caller-owned snapshots: no I/O,
//! no interior state, safe to call from many threads at once. An inverse solve
//! costs exactly `60 × pools` quote evaluations (61 when it falls back).
//!
//! ## Example
//!
//! ```rust
//! use tidal_amm::{ConstantProductPool, DirectQuoteSelector, InverseQuoteSolver, PoolIndex};
//! use tidal_types::TokenId;
//!
//! let (a, b) = (TokenId::from("a.near"), TokenId::from("b.near"));
//! let pools = vec![
//!     ConstantProductPool::new(PoolIndex(0), [(a.clone(), 1000), (b.clone(), 1000)], 30).unwrap(),
//! ];
//!
//! let quote = DirectQuoteSelector::new().select_best(&pools, &a, &b, 100);
//! assert_eq!(quote.amount_out(), 90);
//!
//! let inverse = InverseQuoteSolver::default().solve_for_output(&pools, &a, &b, 1_000, 90);
//! assert!(inverse.amount_out() > 90);
//! assert_eq!(inverse.expected_amount_out(), 90);
//! ```

pub mod constant_product;
pub mod error;
pub mod inverse;
pub mod pool_traits;
pub mod price_impact;
pub mod quote;
pub mod selector;

pub use constant_product::ConstantProductPool;
pub use error::AmmError;
pub use inverse::{InverseQuoteSolver, INVERSE_SEARCH_ITERATIONS};
pub use pool_traits::{AmmPool, Pool, PoolIndex};
pub use price_impact::{
    ImpactSeverity, ImpactThresholds, PriceImpact, PriceImpactEvaluator, ReferenceValue,
};
pub use quote::Quote;
pub use selector::{DirectQuoteSelector, TieBreak};

/// Common types for reference-value calculations
pub use rust_decimal::Decimal;
