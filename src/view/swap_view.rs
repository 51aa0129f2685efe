use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};

use crate::entity::{Batch, SwapConfig, Template, ValidationError};
use crate::utils;

#[async_trait]
pub trait SwapView: Send + Sync {
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()>;
    async fn display_processing(&self, config: &SwapConfig) -> Result<()>;
    async fn display_swap_result(&self, batch: &Batch, config: &SwapConfig) -> Result<()>;
    async fn display_submission_in_flight(&self) -> Result<()>;
    async fn display_template_saved(&self, template: &Template) -> Result<()>;
}

pub struct LogSwapView;

#[async_trait]
impl SwapView for LogSwapView {
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()> {
        warn!("Swap not submitted: {}", error);
        Ok(())
    }

    async fn display_processing(&self, config: &SwapConfig) -> Result<()> {
        info!(
            "Swapping {} {} on {} for {} on {} (max slippage {}%)...",
            utils::format_amount(&config.amount, 6),
            config.from_token,
            config.from_chain,
            config.to_token,
            config.to_chain,
            config.slippage_tolerance
        );
        info!(
            "Minimum received: ≈ {:.6} {}",
            config.estimated_output(),
            config.to_token
        );
        Ok(())
    }

    async fn display_swap_result(&self, batch: &Batch, config: &SwapConfig) -> Result<()> {
        if batch.completed_transactions == batch.total_transactions {
            info!("✅ Swap completed: {} {} to {}", config.amount, config.from_token, config.to_token);
        } else {
            warn!("❌ Swap failed: {} {} to {}", config.amount, config.from_token, config.to_token);
        }
        Ok(())
    }

    async fn display_submission_in_flight(&self) -> Result<()> {
        warn!("A swap is already being submitted. Please wait.");
        Ok(())
    }

    async fn display_template_saved(&self, template: &Template) -> Result<()> {
        info!("Saved swap template '{}'", template.name);
        Ok(())
    }
}
