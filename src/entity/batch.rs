use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A group of transactions created together from one submitted config.
///
/// The counters are derived from the child transactions by
/// `status_tracker::recompute_batch` and are never set by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: String,
    pub user_id: String,
    pub description: String,
    pub creation_timestamp: DateTime<Utc>,
    pub total_transactions: usize,
    pub completed_transactions: usize,
    pub failed_transactions: usize,
}

impl Batch {
    pub fn settled_transactions(&self) -> usize {
        self.completed_transactions + self.failed_transactions
    }

    /// True once every child transaction reached a terminal status.
    pub fn is_settled(&self) -> bool {
        self.settled_transactions() == self.total_transactions
    }

    pub fn is_partially_failed(&self) -> bool {
        self.failed_transactions > 0 && self.completed_transactions > 0
    }
}
