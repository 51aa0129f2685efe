use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::ValidationError;
use crate::utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub wallet_address: String,
    pub farcaster_id: Option<String>,
    pub creation_date: DateTime<Utc>,
}

impl User {
    pub fn new(wallet_address: &str, farcaster_id: Option<String>) -> Result<Self, ValidationError> {
        if !utils::validate_address(wallet_address) {
            return Err(ValidationError::InvalidWalletAddress(
                wallet_address.to_string(),
            ));
        }

        Ok(Self {
            user_id: utils::generate_id(),
            wallet_address: wallet_address.to_string(),
            farcaster_id,
            creation_date: Utc::now(),
        })
    }
}
