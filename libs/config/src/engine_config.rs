//! Engine Configuration Module
//!
//! Host-tunable defaults for pool creation and swap previews. Loaded from a
//! TOML file with environment-specific overrides and `MINIDEX_` environment
//! variables layered on top.

use crate::protocol::{slippage::MAX_SLIPPAGE_BPS, MAX_FEE_RATE_BPS};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Defaults a host applies when the caller leaves a parameter unspecified
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Fee for newly created pools, in bps
    pub default_fee_rate_bps: u16,

    /// Tolerance used to derive a minimum output from a quote, in bps
    pub default_slippage_bps: u16,

    /// Quotes at or above this price impact are flagged as high impact
    pub high_price_impact_bps: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_fee_rate_bps: 30,   // 0.3%
            default_slippage_bps: 100,  // 1%
            high_price_impact_bps: 500, // 5%
        }
    }
}

impl EngineConfig {
    /// Load configuration from files with environment overrides
    ///
    /// The base file is required. `environment` selects an optional
    /// `config/environments/<env>.toml` relative to the working directory,
    /// and `MINIDEX_*` variables override both.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new("config/engine.toml"));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        if let Some(env) = environment {
            let env_file = PathBuf::from("config/environments").join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("MINIDEX")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build engine configuration")?
            .try_deserialize()
            .context("Failed to deserialize engine configuration")?;

        config.validate()?;
        debug!(?config, "Engine configuration loaded");
        Ok(config)
    }

    /// Check values against the engine's fixed limits
    pub fn validate(&self) -> Result<()> {
        if self.default_fee_rate_bps > MAX_FEE_RATE_BPS {
            bail!(
                "default_fee_rate_bps {} exceeds maximum {}",
                self.default_fee_rate_bps,
                MAX_FEE_RATE_BPS
            );
        }
        if self.default_slippage_bps > MAX_SLIPPAGE_BPS {
            bail!(
                "default_slippage_bps {} exceeds maximum {}",
                self.default_slippage_bps,
                MAX_SLIPPAGE_BPS
            );
        }
        if self.high_price_impact_bps > MAX_SLIPPAGE_BPS {
            bail!(
                "high_price_impact_bps {} exceeds maximum {}",
                self.high_price_impact_bps,
                MAX_SLIPPAGE_BPS
            );
        }
        Ok(())
    }

    /// Render as TOML, e.g. to seed a config file with the defaults
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize engine configuration")
    }
}

/// Convenience function to load configuration, falling back to defaults when
/// no config file exists
pub fn load_config(environment: Option<&str>) -> Result<EngineConfig> {
    let base = Path::new("config/engine.toml");
    if !base.exists() {
        warn!("No engine config at {:?}, using defaults", base);
        let config = EngineConfig::default();
        config.validate()?;
        return Ok(config);
    }
    EngineConfig::load(Some(base), environment)
}
