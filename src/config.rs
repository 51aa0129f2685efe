use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::chain::{DEFAULT_SLIPPAGE, MAX_RECIPIENTS_PER_BATCH, MAX_SLIPPAGE, MIN_SLIPPAGE};
use crate::utils;

const DEFAULT_WALLET_ADDRESS: &str = "0x0000000000000000000000000000000000000001";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Wallet address of the session user
    pub wallet_address: String,

    /// Upper bound on recipients in one transfer batch
    pub max_recipients_per_batch: usize,

    /// Accept the same recipient address more than once in a batch
    pub allow_duplicate_recipients: bool,

    /// Slippage used when a swap form leaves it empty, in percent
    pub default_slippage: f64,

    /// Artificial latency of the simulated submitter
    pub submission_delay_ms: u64,

    /// Probability (0.0 to 1.0) that a simulated submission fails
    pub simulated_failure_rate: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wallet_address: DEFAULT_WALLET_ADDRESS.to_string(),
            max_recipients_per_batch: MAX_RECIPIENTS_PER_BATCH,
            allow_duplicate_recipients: false,
            default_slippage: DEFAULT_SLIPPAGE,
            submission_delay_ms: 2000,
            simulated_failure_rate: 0.0,
        }
    }
}

impl AppConfig {
    /// Loads defaults, then `batchswap.toml` if present, then `BATCHSWAP_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let settings = config::Config::builder()
            .set_default("wallet_address", defaults.wallet_address)?
            .set_default(
                "max_recipients_per_batch",
                defaults.max_recipients_per_batch as u64,
            )?
            .set_default(
                "allow_duplicate_recipients",
                defaults.allow_duplicate_recipients,
            )?
            .set_default("default_slippage", defaults.default_slippage)?
            .set_default("submission_delay_ms", defaults.submission_delay_ms)?
            .set_default("simulated_failure_rate", defaults.simulated_failure_rate)?
            .add_source(config::File::with_name("batchswap").required(false))
            .add_source(config::Environment::with_prefix("BATCHSWAP").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !utils::validate_address(&self.wallet_address) {
            return Err(anyhow!("Invalid wallet address: {}", self.wallet_address));
        }

        if self.max_recipients_per_batch == 0
            || self.max_recipients_per_batch > MAX_RECIPIENTS_PER_BATCH
        {
            return Err(anyhow!(
                "max_recipients_per_batch must be between 1 and {}",
                MAX_RECIPIENTS_PER_BATCH
            ));
        }

        if !(MIN_SLIPPAGE..=MAX_SLIPPAGE).contains(&self.default_slippage) {
            return Err(anyhow!(
                "default_slippage must be between {}% and {}%",
                MIN_SLIPPAGE,
                MAX_SLIPPAGE
            ));
        }

        if !(0.0..=1.0).contains(&self.simulated_failure_rate) {
            return Err(anyhow!("simulated_failure_rate must be between 0 and 1"));
        }

        Ok(())
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }
}
