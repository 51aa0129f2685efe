//! Transaction status transitions and the batch counters derived from them.
//!
//! Transactions move `pending -> processing -> {completed | failed}`, or
//! straight from `pending` to `failed` when rejected before submission.
//! Terminal statuses never change again.

use chrono::{DateTime, Utc};
use log::debug;

use crate::entity::{
    AppError, Batch, StatusFilter, Transaction, TransactionStats, TransactionStatus,
};

/// A requested status change together with the data it records.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Processing,
    Completed { tx_hash: String },
    Failed { error_message: String },
}

impl StatusUpdate {
    pub fn target(&self) -> TransactionStatus {
        match self {
            StatusUpdate::Processing => TransactionStatus::Processing,
            StatusUpdate::Completed { .. } => TransactionStatus::Completed,
            StatusUpdate::Failed { .. } => TransactionStatus::Failed,
        }
    }
}

/// Applies `update` to `transaction` if the transition is allowed.
///
/// On error the transaction is left untouched.
pub fn apply_update(
    transaction: &mut Transaction,
    update: StatusUpdate,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let from = transaction.status;
    let to = update.target();

    if !from.can_transition_to(to) {
        return Err(AppError::InvalidTransition { from, to });
    }

    match update {
        StatusUpdate::Processing => {}
        StatusUpdate::Completed { tx_hash } => {
            transaction.completion_timestamp = Some(now);
            transaction.tx_hash = Some(tx_hash);
        }
        StatusUpdate::Failed { error_message } => {
            transaction.error_message = Some(error_message);
        }
    }
    transaction.status = to;

    debug!(
        "Transaction {} moved from {} to {}",
        transaction.transaction_id, from, to
    );
    Ok(())
}

/// Recomputes the batch counters from the full set of its children.
///
/// `transactions` may contain other batches' transactions; they are ignored.
pub fn recompute_batch(batch: &mut Batch, transactions: &[Transaction]) {
    let mut completed = 0;
    let mut failed = 0;

    for tx in transactions.iter().filter(|t| t.batch_id == batch.batch_id) {
        match tx.status {
            TransactionStatus::Completed => completed += 1,
            TransactionStatus::Failed => failed += 1,
            _ => {}
        }
    }

    batch.completed_transactions = completed;
    batch.failed_transactions = failed;
}

pub fn transaction_stats(transactions: &[Transaction]) -> TransactionStats {
    transactions
        .iter()
        .fold(TransactionStats::default(), |mut stats, tx| {
            stats.total += 1;
            match tx.status {
                TransactionStatus::Pending => stats.pending += 1,
                TransactionStatus::Processing => stats.processing += 1,
                TransactionStatus::Completed => stats.completed += 1,
                TransactionStatus::Failed => stats.failed += 1,
            }
            stats
        })
}

/// Dashboard filter: by status, and optionally by batch.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: StatusFilter,
    batch_id: Option<&str>,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| filter.matches(tx.status))
        .filter(|tx| batch_id.map_or(true, |id| tx.batch_id == id))
        .collect()
}
