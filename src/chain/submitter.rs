use async_trait::async_trait;

use crate::entity::{SubmissionError, TxOutcome, WorkUnit};

/// Boundary to the wallet/chain collaborator.
///
/// The core hands over one validated unit of work at a time and gets back a
/// transaction hash or a human-readable failure. How signing and broadcast
/// happen is not the core's concern.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Checks a unit before anything is sent. A failure here moves the
    /// transaction straight from pending to failed.
    async fn preflight(&self, _unit: &WorkUnit) -> Result<(), SubmissionError> {
        Ok(())
    }

    async fn submit(&self, unit: &WorkUnit) -> Result<TxOutcome, SubmissionError>;
}
