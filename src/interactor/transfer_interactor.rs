use std::collections::HashSet;

use crate::chain;
use crate::entity::{Recipient, TransferConfig, TransferForm, ValidationError};
use crate::interactor::ValidationRules;
use crate::utils;

/// Builds a validated `TransferConfig` from raw form input.
///
/// Rows are checked in order and the first failing row is reported.
pub fn build_transfer_config(
    form: &TransferForm,
    rules: &ValidationRules,
) -> Result<TransferConfig, ValidationError> {
    let token = form.token.trim();
    if chain::find_token(token).is_none() {
        return Err(ValidationError::UnsupportedToken(token.to_string()));
    }

    let count = form.recipients.len();
    if count == 0 {
        return Err(ValidationError::NoRecipients);
    }
    if count > rules.max_recipients {
        return Err(ValidationError::TooManyRecipients {
            count,
            max: rules.max_recipients,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    let mut recipients = Vec::with_capacity(count);

    for (index, row) in form.recipients.iter().enumerate() {
        let address = row.address.trim();
        if !utils::validate_address(address) {
            return Err(ValidationError::InvalidAddress {
                index,
                address: row.address.clone(),
            });
        }

        // The stored amount is the leading number, and it must fit an exact decimal
        let amount = match utils::normalize_amount(&row.amount) {
            Some(amount)
                if utils::validate_amount(&amount) && utils::parse_amount(&amount).is_some() =>
            {
                amount
            }
            _ => {
                return Err(ValidationError::InvalidAmount {
                    index,
                    amount: row.amount.clone(),
                })
            }
        };

        // Addresses differ only in case when checksummed, so compare lowercased
        if !rules.allow_duplicate_recipients && !seen.insert(address.to_lowercase()) {
            return Err(ValidationError::DuplicateRecipient(address.to_string()));
        }

        let label = row
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        recipients.push(Recipient {
            address: address.to_string(),
            amount,
            label,
        });
    }

    let config = TransferConfig {
        token: token.to_string(),
        recipients,
    };
    if config.total_amount().is_none() {
        return Err(ValidationError::TotalAmountOverflow);
    }

    Ok(config)
}
