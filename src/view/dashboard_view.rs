use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::info;

use crate::entity::{ActiveView, Batch, StatusFilter, Transaction, TransactionStats};
use crate::utils;

#[async_trait]
pub trait DashboardView: Send + Sync {
    async fn display_dashboard(
        &self,
        stats: &TransactionStats,
        batches: &[Batch],
        transactions: &[Transaction],
        filter: StatusFilter,
    ) -> Result<()>;
    async fn display_active_view(&self, view: ActiveView) -> Result<()>;
}

pub struct LogDashboardView;

#[async_trait]
impl DashboardView for LogDashboardView {
    async fn display_dashboard(
        &self,
        stats: &TransactionStats,
        batches: &[Batch],
        transactions: &[Transaction],
        filter: StatusFilter,
    ) -> Result<()> {
        info!(
            "📊 Total: {} | Active: {} | Completed: {} | Failed: {}",
            stats.total,
            stats.active(),
            stats.completed,
            stats.failed
        );

        let now = Utc::now();
        for batch in batches {
            info!(
                "Batch {} - {} ({}/{} completed, {} failed) {}",
                batch.batch_id,
                batch.description,
                batch.completed_transactions,
                batch.total_transactions,
                batch.failed_transactions,
                utils::format_timestamp(batch.creation_timestamp, now)
            );
        }

        info!("Transactions ({:?}): {}", filter, transactions.len());
        for tx in transactions {
            let detail = match (&tx.tx_hash, &tx.error_message) {
                (Some(hash), _) => utils::format_address(hash),
                (None, Some(error)) => error.clone(),
                (None, None) => String::new(),
            };
            info!("  {} {} {} {}", tx.transaction_id, tx.tx_type, tx.status, detail);
        }
        Ok(())
    }

    async fn display_active_view(&self, view: ActiveView) -> Result<()> {
        info!("Switched to {} view", view);
        Ok(())
    }
}
