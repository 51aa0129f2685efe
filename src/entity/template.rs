use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{SwapConfig, SwapForm, TransferConfig, TransferForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Transfer,
    Swap,
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateType::Transfer => write!(f, "transfer"),
            TemplateType::Swap => write!(f, "swap"),
        }
    }
}

/// Saved configuration, tagged by template type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateConfig {
    Transfer(TransferConfig),
    Swap(SwapConfig),
}

impl TemplateConfig {
    pub fn template_type(&self) -> TemplateType {
        match self {
            TemplateConfig::Transfer(_) => TemplateType::Transfer,
            TemplateConfig::Swap(_) => TemplateType::Swap,
        }
    }

    pub fn to_form(&self) -> TemplateForm {
        match self {
            TemplateConfig::Transfer(config) => TemplateForm::Transfer(config.to_form()),
            TemplateConfig::Swap(config) => TemplateForm::Swap(config.to_form()),
        }
    }
}

/// A template's config loaded back into the matching form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateForm {
    Transfer(TransferForm),
    Swap(SwapForm),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub template_id: String,
    pub user_id: String,
    pub name: String,
    pub config: TemplateConfig,
    pub created_at: DateTime<Utc>,
}

impl Template {
    pub fn template_type(&self) -> TemplateType {
        self.config.template_type()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFilter {
    #[default]
    All,
    Transfer,
    Swap,
}

impl TemplateFilter {
    pub fn matches(&self, template_type: TemplateType) -> bool {
        match self {
            TemplateFilter::All => true,
            TemplateFilter::Transfer => template_type == TemplateType::Transfer,
            TemplateFilter::Swap => template_type == TemplateType::Swap,
        }
    }
}
