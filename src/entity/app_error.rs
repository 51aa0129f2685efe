use crate::entity::TransactionStatus;

/// Field-level problems found while building a config from form input.
///
/// These block submission and never reach the batch layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one recipient is required")]
    NoRecipients,

    #[error("Too many recipients: {count} (maximum is {max})")]
    TooManyRecipients { count: usize, max: usize },

    #[error("Invalid address for recipient {index}: {address}")]
    InvalidAddress { index: usize, address: String },

    #[error("Invalid amount for recipient {index}: {amount}")]
    InvalidAmount { index: usize, amount: String },

    #[error("Duplicate recipient address: {0}")]
    DuplicateRecipient(String),

    #[error("Invalid amount: {0}")]
    InvalidSwapAmount(String),

    #[error("Source and target tokens must be different ({0})")]
    SameToken(String),

    #[error("Slippage tolerance {0}% is outside the allowed range (0.1% to 50%)")]
    InvalidSlippage(f64),

    #[error("Unsupported token: {0}")]
    UnsupportedToken(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Template name must not be empty")]
    EmptyTemplateName,

    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(String),

    #[error("Total amount is too large")]
    TotalAmountOverflow,
}

/// Failure reported by the chain collaborator for one unit of work.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Submission timed out")]
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("A {0} submission is already in flight")]
    SubmissionInFlight(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
