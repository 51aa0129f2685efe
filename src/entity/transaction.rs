use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a single unit of work.
///
/// `Pending -> Processing -> {Completed | Failed}`, plus `Pending -> Failed`
/// when a unit is rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Completed | TransactionStatus::Failed)
    }

    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Processing) | (Pending, Failed) | (Processing, Completed) | (Processing, Failed)
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Processing => write!(f, "processing"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Transfer,
    Swap,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Transfer => write!(f, "transfer"),
            TransactionType::Swap => write!(f, "swap"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub user_id: String,
    pub template_id: Option<String>,
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub batch_id: String,
    pub initiating_timestamp: DateTime<Utc>,
    pub completion_timestamp: Option<DateTime<Utc>>,
    pub tx_hash: Option<String>,
    pub error_message: Option<String>,
}

/// Dashboard status filter. Each variant matches its own status only; `Processing`
/// appears under `All` and in `TransactionStats::active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    Failed,
}

impl StatusFilter {
    pub fn matches(&self, status: TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TransactionStatus::Pending,
            StatusFilter::Completed => status == TransactionStatus::Completed,
            StatusFilter::Failed => status == TransactionStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl TransactionStats {
    // Pending and processing together
    pub fn active(&self) -> usize {
        self.pending + self.processing
    }
}
