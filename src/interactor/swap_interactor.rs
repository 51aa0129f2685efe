use crate::chain::{self, MAX_SLIPPAGE, MIN_SLIPPAGE};
use crate::entity::{SwapConfig, SwapForm, ValidationError};
use crate::interactor::ValidationRules;
use crate::utils;

/// Builds a validated `SwapConfig` from raw form input.
pub fn build_swap_config(
    form: &SwapForm,
    rules: &ValidationRules,
) -> Result<SwapConfig, ValidationError> {
    let from_token = form.from_token.trim();
    let to_token = form.to_token.trim();

    for token in [from_token, to_token] {
        if chain::find_token(token).is_none() {
            return Err(ValidationError::UnsupportedToken(token.to_string()));
        }
    }

    if from_token == to_token {
        return Err(ValidationError::SameToken(from_token.to_string()));
    }

    let from_chain = form.from_chain.trim();
    let to_chain = form.to_chain.trim();

    for chain_name in [from_chain, to_chain] {
        if chain::find_chain(chain_name).is_none() {
            return Err(ValidationError::UnsupportedChain(chain_name.to_string()));
        }
    }

    let amount = match utils::normalize_amount(&form.amount) {
        Some(amount) if utils::validate_amount(&amount) => amount,
        _ => return Err(ValidationError::InvalidSwapAmount(form.amount.clone())),
    };

    let slippage = form.slippage_tolerance.unwrap_or(rules.default_slippage);
    // NaN fails the range check too
    if !(MIN_SLIPPAGE..=MAX_SLIPPAGE).contains(&slippage) {
        return Err(ValidationError::InvalidSlippage(slippage));
    }

    Ok(SwapConfig {
        from_token: from_token.to_string(),
        to_token: to_token.to_string(),
        from_chain: from_chain.to_string(),
        to_chain: to_chain.to_string(),
        amount,
        slippage_tolerance: slippage,
    })
}
