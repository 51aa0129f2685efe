use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};

use crate::entity::{Template, TemplateConfig, TemplateFilter, TemplateForm};
use crate::utils;

#[async_trait]
pub trait TemplateView: Send + Sync {
    async fn display_templates(
        &self,
        templates: &[Template],
        filter: TemplateFilter,
        query: &str,
    ) -> Result<()>;
    async fn display_loaded_form(&self, template_id: &str, form: &TemplateForm) -> Result<()>;
    async fn display_template_deleted(&self, template_id: &str) -> Result<()>;
    async fn display_template_not_found(&self, template: &str) -> Result<()>;
}

pub struct LogTemplateView;

fn summary(template: &Template) -> String {
    match &template.config {
        TemplateConfig::Transfer(config) => format!(
            "{} recipients, {} {}",
            config.recipients.len(),
            config
                .total_amount()
                .map(|total| utils::format_amount(&total.to_string(), 4))
                .unwrap_or_else(|| "?".to_string()),
            config.token
        ),
        TemplateConfig::Swap(config) => format!(
            "{} {} ({}) to {} ({})",
            utils::format_amount(&config.amount, 4),
            config.from_token,
            config.from_chain,
            config.to_token,
            config.to_chain
        ),
    }
}

#[async_trait]
impl TemplateView for LogTemplateView {
    async fn display_templates(
        &self,
        templates: &[Template],
        filter: TemplateFilter,
        query: &str,
    ) -> Result<()> {
        if templates.is_empty() {
            info!("No templates found (filter: {:?}, search: '{}')", filter, query);
            return Ok(());
        }

        let now = Utc::now();
        for template in templates {
            info!(
                "📋 {} [{}] {} - created {}",
                template.name,
                template.template_type(),
                summary(template),
                utils::format_timestamp(template.created_at, now)
            );
        }
        Ok(())
    }

    async fn display_loaded_form(&self, template_id: &str, form: &TemplateForm) -> Result<()> {
        match form {
            TemplateForm::Transfer(form) => info!(
                "Loaded template {} into the transfer form ({} recipients)",
                template_id,
                form.recipients.len()
            ),
            TemplateForm::Swap(form) => info!(
                "Loaded template {} into the swap form ({} to {})",
                template_id, form.from_token, form.to_token
            ),
        }
        Ok(())
    }

    async fn display_template_deleted(&self, template_id: &str) -> Result<()> {
        info!("Template {} deleted", template_id);
        Ok(())
    }

    async fn display_template_not_found(&self, template: &str) -> Result<()> {
        warn!("Template not found: {}", template);
        Ok(())
    }
}
