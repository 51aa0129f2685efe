use crate::config::AppConfig;

pub mod batch_factory;
pub mod reducer;
pub mod session_interactor;
pub mod status_tracker;
pub mod store;
pub mod swap_interactor;
pub mod template_store;
pub mod transfer_interactor;

/// Limits applied by the config builders.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRules {
    pub max_recipients: usize,
    pub allow_duplicate_recipients: bool,
    pub default_slippage: f64,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ValidationRules {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_recipients: config.max_recipients_per_batch,
            allow_duplicate_recipients: config.allow_duplicate_recipients,
            default_slippage: config.default_slippage,
        }
    }
}
