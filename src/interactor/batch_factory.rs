use chrono::{DateTime, Utc};
use log::debug;

use crate::entity::{
    Batch, SwapConfig, Transaction, TransactionStatus, TransactionType, TransferConfig, WorkUnit,
};
use crate::utils;

/// A freshly created batch, its pending transactions and the work unit each
/// transaction stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub batch: Batch,
    pub transactions: Vec<Transaction>,
    /// `(transaction_id, unit)` in the same order as `transactions`
    pub units: Vec<(String, WorkUnit)>,
}

/// One batch, one pending transaction per recipient.
pub fn create_transfer_batch(
    user_id: &str,
    config: &TransferConfig,
    template_id: Option<&str>,
    now: DateTime<Utc>,
) -> BatchPlan {
    let description = format!("Batch Transfer - {} recipients", config.recipients.len());
    let units = config
        .recipients
        .iter()
        .map(|recipient| WorkUnit::Transfer {
            token: config.token.clone(),
            recipient: recipient.clone(),
        })
        .collect();

    build_plan(
        user_id,
        description,
        TransactionType::Transfer,
        units,
        template_id,
        now,
    )
}

/// One batch holding a single pending swap transaction.
pub fn create_swap_batch(
    user_id: &str,
    config: &SwapConfig,
    template_id: Option<&str>,
    now: DateTime<Utc>,
) -> BatchPlan {
    let description = format!("Swap {} to {}", config.from_token, config.to_token);

    build_plan(
        user_id,
        description,
        TransactionType::Swap,
        vec![WorkUnit::Swap(config.clone())],
        template_id,
        now,
    )
}

fn build_plan(
    user_id: &str,
    description: String,
    tx_type: TransactionType,
    units: Vec<WorkUnit>,
    template_id: Option<&str>,
    now: DateTime<Utc>,
) -> BatchPlan {
    let batch_id = utils::generate_id();

    let mut transactions = Vec::with_capacity(units.len());
    let mut planned = Vec::with_capacity(units.len());

    for unit in units {
        let transaction = Transaction {
            transaction_id: utils::generate_id(),
            user_id: user_id.to_string(),
            template_id: template_id.map(str::to_string),
            tx_type,
            status: TransactionStatus::Pending,
            batch_id: batch_id.clone(),
            initiating_timestamp: now,
            completion_timestamp: None,
            tx_hash: None,
            error_message: None,
        };
        planned.push((transaction.transaction_id.clone(), unit));
        transactions.push(transaction);
    }

    let batch = Batch {
        batch_id,
        user_id: user_id.to_string(),
        description,
        creation_timestamp: now,
        total_transactions: transactions.len(),
        completed_transactions: 0,
        failed_transactions: 0,
    };

    debug!(
        "Planned batch {} with {} transactions",
        batch.batch_id, batch.total_transactions
    );

    BatchPlan {
        batch,
        transactions,
        units: planned,
    }
}
