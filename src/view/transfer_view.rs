use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};
use rust_decimal::Decimal;

use crate::entity::{Batch, Template, ValidationError};
use crate::utils;

#[async_trait]
pub trait TransferView: Send + Sync {
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()>;
    async fn display_processing(&self, recipients: usize, total: Decimal, token: &str)
        -> Result<()>;
    async fn display_batch_result(&self, batch: &Batch, total: Decimal, token: &str) -> Result<()>;
    async fn display_submission_in_flight(&self) -> Result<()>;
    async fn display_template_saved(&self, template: &Template) -> Result<()>;
}

pub struct LogTransferView;

#[async_trait]
impl TransferView for LogTransferView {
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()> {
        warn!("Batch transfer not submitted: {}", error);
        Ok(())
    }

    async fn display_processing(
        &self,
        recipients: usize,
        total: Decimal,
        token: &str,
    ) -> Result<()> {
        info!(
            "Sending {} {} to {} recipients... Please wait.",
            utils::format_amount(&total.to_string(), 6),
            token,
            recipients
        );
        Ok(())
    }

    async fn display_batch_result(&self, batch: &Batch, total: Decimal, token: &str) -> Result<()> {
        if batch.failed_transactions == 0 {
            info!(
                "✅ {}: {} {} sent ({}/{} completed)",
                batch.description,
                utils::format_amount(&total.to_string(), 6),
                token,
                batch.completed_transactions,
                batch.total_transactions
            );
        } else {
            warn!(
                "❌ {}: {} completed, {} failed of {}",
                batch.description,
                batch.completed_transactions,
                batch.failed_transactions,
                batch.total_transactions
            );
        }
        Ok(())
    }

    async fn display_submission_in_flight(&self) -> Result<()> {
        warn!("A batch transfer is already being submitted. Please wait.");
        Ok(())
    }

    async fn display_template_saved(&self, template: &Template) -> Result<()> {
        info!("Saved transfer template '{}'", template.name);
        Ok(())
    }
}
