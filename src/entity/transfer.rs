use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils;

/// Raw recipient row as typed into the batch transfer form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipientForm {
    pub address: String,
    pub amount: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Raw batch transfer form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferForm {
    pub token: String,
    pub recipients: Vec<RecipientForm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub address: String,
    pub amount: String,
    pub label: Option<String>,
}

/// A validated batch transfer. Built by `transfer_interactor::build_transfer_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferConfig {
    pub token: String,
    pub recipients: Vec<Recipient>,
}

impl TransferConfig {
    /// Exact sum of all recipient amounts.
    ///
    /// `None` if an amount is not a representable decimal or the sum overflows.
    pub fn total_amount(&self) -> Option<Decimal> {
        self.recipients.iter().try_fold(Decimal::ZERO, |total, r| {
            total.checked_add(utils::parse_amount(&r.amount)?)
        })
    }

    // Load back into the form, for reusing a template
    pub fn to_form(&self) -> TransferForm {
        TransferForm {
            token: self.token.clone(),
            recipients: self
                .recipients
                .iter()
                .map(|r| RecipientForm {
                    address: r.address.clone(),
                    amount: r.amount.clone(),
                    label: r.label.clone(),
                })
                .collect(),
        }
    }
}
