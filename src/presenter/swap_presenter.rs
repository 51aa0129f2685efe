use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{AppError, SwapForm, TemplateConfig};
use crate::interactor::session_interactor::SessionInteractor;
use crate::view::swap_view::SwapView;

#[async_trait]
pub trait SwapPresenter: Send + Sync {
    async fn submit(&self, form: &SwapForm, template_id: Option<String>) -> Result<()>;
    async fn save_template(&self, name: &str, form: &SwapForm) -> Result<()>;
}

pub struct SwapPresenterImpl<I: ?Sized, V: ?Sized> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I: ?Sized, V: ?Sized> SwapPresenterImpl<I, V>
where
    I: SessionInteractor,
    V: SwapView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I: ?Sized, V: ?Sized> SwapPresenter for SwapPresenterImpl<I, V>
where
    I: SessionInteractor,
    V: SwapView,
{
    async fn submit(&self, form: &SwapForm, template_id: Option<String>) -> Result<()> {
        let config = match self.interactor.build_swap_config(form) {
            Ok(config) => config,
            Err(e) => {
                self.view.display_validation_error(&e).await?;
                return Ok(());
            }
        };

        self.view.display_processing(&config).await?;

        match self.interactor.submit_swap(config.clone(), template_id).await {
            Ok(batch) => self.view.display_swap_result(&batch, &config).await?,
            Err(AppError::SubmissionInFlight(_)) => {
                self.view.display_submission_in_flight().await?
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    async fn save_template(&self, name: &str, form: &SwapForm) -> Result<()> {
        let config = match self.interactor.build_swap_config(form) {
            Ok(config) => config,
            Err(e) => {
                self.view.display_validation_error(&e).await?;
                return Ok(());
            }
        };

        match self
            .interactor
            .save_template(name, TemplateConfig::Swap(config))
            .await
        {
            Ok(template) => self.view.display_template_saved(&template).await?,
            Err(AppError::Validation(e)) => self.view.display_validation_error(&e).await?,
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}
