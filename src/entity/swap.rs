use serde::{Deserialize, Serialize};

use crate::utils;

/// Raw swap form input. A missing slippage falls back to the configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwapForm {
    pub from_token: String,
    pub to_token: String,
    pub from_chain: String,
    pub to_chain: String,
    pub amount: String,
    #[serde(default)]
    pub slippage_tolerance: Option<f64>,
}

impl SwapForm {
    /// Flips the swap direction: tokens and chains trade places.
    pub fn reversed(&self) -> SwapForm {
        SwapForm {
            from_token: self.to_token.clone(),
            to_token: self.from_token.clone(),
            from_chain: self.to_chain.clone(),
            to_chain: self.from_chain.clone(),
            amount: self.amount.clone(),
            slippage_tolerance: self.slippage_tolerance,
        }
    }
}

/// A validated cross-chain swap. Slippage is in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapConfig {
    pub from_token: String,
    pub to_token: String,
    pub from_chain: String,
    pub to_chain: String,
    pub amount: String,
    pub slippage_tolerance: f64,
}

impl SwapConfig {
    pub fn to_form(&self) -> SwapForm {
        SwapForm {
            from_token: self.from_token.clone(),
            to_token: self.to_token.clone(),
            from_chain: self.from_chain.clone(),
            to_chain: self.to_chain.clone(),
            amount: self.amount.clone(),
            slippage_tolerance: Some(self.slippage_tolerance),
        }
    }

    pub fn is_cross_chain(&self) -> bool {
        self.from_chain != self.to_chain
    }

    /// Minimum received at the demo rate, after slippage. Not a quote.
    pub fn estimated_output(&self) -> f64 {
        utils::estimate_swap_output(&self.amount, self.slippage_tolerance).unwrap_or(0.0)
    }
}
