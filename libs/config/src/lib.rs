//! # Tidal Configuration
//!
//! Explicit configuration for the quote caller layer. The core engine takes
//! no configuration at all; everything that used to be an ambient default
//! (network, default token pair, impact thresholds) is a value built here and
//! passed down.
//!
//! ## Sources, lowest precedence first
//!
//! - **Defaults**: [`defaults`] constants
//! - **Base file**: `config/quoter.toml`
//! - **Environment file**: `config/environments/<env>.toml`
//! - **Environment variables**: `TIDAL_` prefix, `__` between sections
//!   (`TIDAL_NETWORK__NETWORK_ID=testnet`)
//!
//! ## Usage
//!
//! ```rust
//! use tidal_config::QuoterConfig;
//!
//! let config = QuoterConfig::default();
//! assert_eq!(config.network.network_id, "mainnet");
//! assert_eq!(config.display.decimal_places, 6);
//! ```

pub mod defaults;
pub mod quoter_config;

// Re-export commonly used types
pub use quoter_config::{
    load_config, DisplayConfig, NetworkConfig, PriceImpactConfig, QuoterConfig, SnapshotConfig,
};
