use serde::{Deserialize, Serialize};

use crate::entity::{Recipient, SwapConfig};

/// Payload handed to the chain collaborator for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkUnit {
    Transfer { token: String, recipient: Recipient },
    Swap(SwapConfig),
}

impl std::fmt::Display for WorkUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkUnit::Transfer { token, recipient } => write!(
                f,
                "transfer {} {} to {}",
                recipient.amount, token, recipient.address
            ),
            WorkUnit::Swap(config) => write!(
                f,
                "swap {} {} ({}) to {} ({})",
                config.amount, config.from_token, config.from_chain, config.to_token, config.to_chain
            ),
        }
    }
}

/// Successful result of submitting one unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxOutcome {
    pub tx_hash: String,
}
