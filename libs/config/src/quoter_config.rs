//! Quoter Configuration Module
//!
//! Provides configuration loading for the quote service.
//! Supports loading from TOML files with environment-specific overrides.

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tidal_amm::ImpactThresholds;
use tidal_types::TokenId;
use tracing::{debug, info, warn};

use crate::defaults;

/// Main quoter configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct QuoterConfig {
    /// Network and default token pair
    pub network: NetworkConfig,

    /// Price impact flagging
    pub price_impact: PriceImpactConfig,

    /// Human amount display
    pub display: DisplayConfig,

    /// Liquidity snapshot source
    pub snapshot: SnapshotConfig,
}

/// Network-level constants the caller layer needs
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub network_id: String,
    pub wrap_near_token: TokenId,
    pub default_input_token: TokenId,
    pub default_output_token: TokenId,
}

/// Thresholds below which a price impact is flagged
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PriceImpactConfig {
    pub warning: Decimal,
    pub danger: Decimal,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub decimal_places: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network_id: defaults::network::NETWORK_ID.to_string(),
            wrap_near_token: TokenId::from(defaults::network::WRAP_NEAR_TOKEN),
            default_input_token: TokenId::from(defaults::network::DEFAULT_INPUT_TOKEN),
            default_output_token: TokenId::from(defaults::network::DEFAULT_OUTPUT_TOKEN),
        }
    }
}

impl Default for PriceImpactConfig {
    fn default() -> Self {
        Self {
            warning: defaults::price_impact::WARNING_FRACTION,
            danger: defaults::price_impact::DANGER_FRACTION,
        }
    }
}

impl PriceImpactConfig {
    pub fn thresholds(&self) -> ImpactThresholds {
        ImpactThresholds {
            warning: self.warning,
            danger: self.danger,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_places: defaults::display::DECIMAL_PLACES,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::snapshot::PATH),
        }
    }
}

impl QuoterConfig {
    /// Load configuration from files with environment overrides
    ///
    /// An explicit `base_path` must exist; the default location is optional.
    /// Environment files are looked up in `environments/` next to the base
    /// file.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(defaults::files::BASE_CONFIG));

        let mut builder =
            Config::builder().add_source(File::from(base).required(base_path.is_some()));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = base
                .parent()
                .map(|dir| dir.join("environments"))
                .unwrap_or_else(|| PathBuf::from(defaults::files::ENVIRONMENTS_DIR))
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (TIDAL_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(defaults::files::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Expand `~` and environment variables in path values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        let raw = self.snapshot.path.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw).context("Failed to expand snapshot path")?;
        self.snapshot.path = PathBuf::from(expanded.as_ref());
        Ok(())
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Reject configurations the caller layer cannot work with
    pub fn validate(&self) -> Result<()> {
        let impact = &self.price_impact;
        if impact.warning > Decimal::ZERO || impact.danger > Decimal::ZERO {
            bail!(
                "Price impact thresholds must be non-positive (warning {}, danger {})",
                impact.warning,
                impact.danger
            );
        }
        if impact.danger > impact.warning {
            bail!(
                "Danger threshold {} must not exceed warning threshold {}",
                impact.danger,
                impact.warning
            );
        }
        if self.display.decimal_places > 28 {
            bail!(
                "Display precision {} exceeds 28 decimal places",
                self.display.decimal_places
            );
        }
        if self.network.default_input_token == self.network.default_output_token {
            bail!(
                "Default input and output token are both {}",
                self.network.default_input_token
            );
        }
        Ok(())
    }
}

/// Convenience function to load, expand and validate configuration
pub fn load_config(base_path: Option<&Path>, environment: Option<&str>) -> Result<QuoterConfig> {
    let mut config = QuoterConfig::load(base_path, environment)?;
    config.expand_env_vars()?;
    config.validate()?;
    Ok(config)
}
