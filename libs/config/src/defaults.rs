//! Default configuration values
//!
//! Used when neither the config files nor the environment set a value.

/// Network defaults (NEAR mainnet)
pub mod network {
    pub const NETWORK_ID: &str = "mainnet";

    /// Wrapped native token, always tradable even without a reference price
    pub const WRAP_NEAR_TOKEN: &str = "wrap.near";

    /// Default input token for a fresh session
    pub const DEFAULT_INPUT_TOKEN: &str = WRAP_NEAR_TOKEN;

    /// Default output token for a fresh session
    pub const DEFAULT_OUTPUT_TOKEN: &str = "token.skyward.near";
}

/// Price impact flagging thresholds (fractions, negative = loss)
pub mod price_impact {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    pub const WARNING_FRACTION: Decimal = dec!(-0.005);
    pub const DANGER_FRACTION: Decimal = dec!(-0.02);
}

/// Human amount display
pub mod display {
    /// Decimal places shown for human amounts (rounded toward zero)
    pub const DECIMAL_PLACES: u32 = 6;
}

/// Liquidity snapshot
pub mod snapshot {
    pub const PATH: &str = "./data/snapshot.json";
}

/// Configuration file locations
pub mod files {
    pub const BASE_CONFIG: &str = "config/quoter.toml";
    pub const ENVIRONMENTS_DIR: &str = "config/environments";
    pub const ENV_PREFIX: &str = "TIDAL";
}
