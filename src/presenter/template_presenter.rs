use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{AppError, TemplateFilter};
use crate::interactor::session_interactor::SessionInteractor;
use crate::view::template_view::TemplateView;

#[async_trait]
pub trait TemplatePresenter: Send + Sync {
    async fn show_templates(&self, filter: TemplateFilter, query: &str) -> Result<()>;
    /// `template` is a template id or an exact template name.
    async fn use_template(&self, template: &str) -> Result<()>;
    async fn delete_template(&self, template: &str) -> Result<()>;
}

pub struct TemplatePresenterImpl<I: ?Sized, V: ?Sized> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I: ?Sized, V: ?Sized> TemplatePresenterImpl<I, V>
where
    I: SessionInteractor,
    V: TemplateView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }

    async fn resolve_id(&self, template: &str) -> Option<String> {
        self.interactor
            .snapshot()
            .await
            .templates
            .into_iter()
            .find(|t| t.template_id == template || t.name == template)
            .map(|t| t.template_id)
    }
}

#[async_trait]
impl<I: ?Sized, V: ?Sized> TemplatePresenter for TemplatePresenterImpl<I, V>
where
    I: SessionInteractor,
    V: TemplateView,
{
    async fn show_templates(&self, filter: TemplateFilter, query: &str) -> Result<()> {
        let templates = self.interactor.list_templates(filter, query).await;
        self.view.display_templates(&templates, filter, query).await
    }

    async fn use_template(&self, template: &str) -> Result<()> {
        let Some(template_id) = self.resolve_id(template).await else {
            return self.view.display_template_not_found(template).await;
        };

        match self.interactor.use_template(&template_id).await {
            Ok(form) => self.view.display_loaded_form(&template_id, &form).await,
            Err(AppError::TemplateNotFound(_)) => {
                self.view.display_template_not_found(template).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_template(&self, template: &str) -> Result<()> {
        // Unknown templates are a no-op, same as deleting by an unknown id
        let template_id = self
            .resolve_id(template)
            .await
            .unwrap_or_else(|| template.to_string());

        self.interactor.delete_template(&template_id).await?;
        self.view.display_template_deleted(&template_id).await
    }
}
