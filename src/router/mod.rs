use anyhow::Result;
use log::debug;
use serde::Deserialize;
use std::sync::Arc;

use crate::di::ServiceContainer;
use crate::entity::{ActiveView, StatusFilter, SwapForm, TemplateFilter, TransferForm};
use crate::presenter::{DashboardPresenter, SwapPresenter, TemplatePresenter, TransferPresenter};

/// A single user action coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SubmitTransfer {
        form: TransferForm,
        #[serde(default)]
        template_id: Option<String>,
    },
    SubmitSwap {
        form: SwapForm,
        #[serde(default)]
        template_id: Option<String>,
        /// Swap in the opposite direction of `form`
        #[serde(default)]
        reverse: bool,
    },
    SaveTransferTemplate {
        name: String,
        form: TransferForm,
    },
    SaveSwapTemplate {
        name: String,
        form: SwapForm,
    },
    /// `template` is an id or an exact name
    DeleteTemplate {
        template: String,
    },
    UseTemplate {
        template: String,
    },
    ListTemplates {
        #[serde(default)]
        filter: TemplateFilter,
        #[serde(default)]
        query: String,
    },
    ShowDashboard {
        #[serde(default)]
        filter: StatusFilter,
        #[serde(default)]
        batch_id: Option<String>,
    },
    Refresh,
    Navigate {
        view: ActiveView,
    },
}

/// Routes intents to the presenter responsible for them.
pub struct IntentRouter {
    transfer: Arc<dyn TransferPresenter>,
    swap: Arc<dyn SwapPresenter>,
    templates: Arc<dyn TemplatePresenter>,
    dashboard: Arc<dyn DashboardPresenter>,
}

impl IntentRouter {
    pub fn new(services: &ServiceContainer) -> Self {
        Self {
            transfer: services.transfer_presenter(),
            swap: services.swap_presenter(),
            templates: services.template_presenter(),
            dashboard: services.dashboard_presenter(),
        }
    }

    pub async fn dispatch(&self, intent: Intent) -> Result<()> {
        debug!("Dispatching {:?}", intent);

        match intent {
            Intent::SubmitTransfer { form, template_id } => {
                self.transfer.submit(&form, template_id).await
            }
            Intent::SubmitSwap {
                form,
                template_id,
                reverse,
            } => {
                let form = if reverse { form.reversed() } else { form };
                self.swap.submit(&form, template_id).await
            }
            Intent::SaveTransferTemplate { name, form } => {
                self.transfer.save_template(&name, &form).await
            }
            Intent::SaveSwapTemplate { name, form } => self.swap.save_template(&name, &form).await,
            Intent::DeleteTemplate { template } => self.templates.delete_template(&template).await,
            Intent::UseTemplate { template } => self.templates.use_template(&template).await,
            Intent::ListTemplates { filter, query } => {
                self.templates.show_templates(filter, &query).await
            }
            Intent::ShowDashboard { filter, batch_id } => {
                self.dashboard.show(filter, batch_id.as_deref()).await
            }
            Intent::Refresh => self.dashboard.refresh().await,
            Intent::Navigate { view } => self.dashboard.navigate(view).await,
        }
    }

    pub async fn dispatch_all(&self, intents: Vec<Intent>) -> Result<()> {
        for intent in intents {
            self.dispatch(intent).await?;
        }
        Ok(())
    }
}
