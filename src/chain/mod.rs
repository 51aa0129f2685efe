// Chain collaborator boundary and the simulated implementation
pub mod constants;
pub mod simulated;
pub mod submitter;

// Re-export commonly used items
pub use constants::{
    find_chain, find_token, DEFAULT_SLIPPAGE, MAX_RECIPIENTS_PER_BATCH, MAX_SLIPPAGE,
    MIN_SLIPPAGE, SUPPORTED_CHAINS, SUPPORTED_TOKENS,
};
pub use simulated::SimulatedSubmitter;
pub use submitter::Submitter;
