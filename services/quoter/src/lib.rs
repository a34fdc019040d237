//! # Tidal Quoter - Swap Quote Caller Layer
//!
//! Wraps the pure `tidal-amm` engine with everything a swap form needs:
//! loading a market snapshot, clamping typed amounts to what the caller can
//! actually spend, choosing between direct and inverse quotes, and deciding
//! when a cached quote is stale.
//!
//! ```text
//! snapshot.json → [pool_loader] → MarketSnapshot
//!                                      ↓
//!        SwapSession ⇄ [SwapQuoter] → SwapOutcome (amounts, rates, impact)
//! ```

pub mod error;
pub mod market;
pub mod pool_loader;
pub mod prices;
pub mod quoter;
pub mod session;

pub use error::{QuoterError, Result};
pub use market::{Balances, MarketSnapshot};
pub use pool_loader::{load_snapshot, parse_snapshot};
pub use prices::PriceTable;
pub use quoter::{PoolDetails, SwapOutcome, SwapQuoter, SwapRequest};
pub use session::{EditMode, SwapSession};
