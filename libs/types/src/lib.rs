//! # Tidal Types
//!
//! Shared value types for the Tidal swap-quote workspace.
//!
//! ## Design Philosophy
//!
//! - **Base Units Everywhere**: Token amounts travel as `u128` base units;
//!   human-readable values only exist at the edges
//! - **No Floating Point**: Human amounts and reference values use
//!   [`Decimal`](rust_decimal::Decimal)
//! - **Explicit Conversions**: Every scale change goes through [`precision`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tidal_types::{precision, TokenId, TokenMetadata, TokenRegistry};
//!
//! let mut registry = TokenRegistry::default();
//! registry.insert(TokenMetadata::new("usdc.near", "USDC", 6));
//!
//! let usdc = TokenId::from("usdc.near");
//! let decimals = registry.decimals(&usdc).unwrap();
//! let base = precision::to_base_units(Decimal::new(15, 1), decimals).unwrap();
//! assert_eq!(base, 1_500_000);
//! ```

pub mod errors;
pub mod precision;
pub mod serde_u128;
pub mod token;

pub use errors::{PrecisionError, Result};
pub use serde_u128::U128;
pub use token::{TokenId, TokenMetadata, TokenRegistry};
