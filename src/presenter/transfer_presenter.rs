use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{AppError, TemplateConfig, TransferForm, ValidationError};
use crate::interactor::session_interactor::SessionInteractor;
use crate::view::transfer_view::TransferView;

#[async_trait]
pub trait TransferPresenter: Send + Sync {
    async fn submit(&self, form: &TransferForm, template_id: Option<String>) -> Result<()>;
    async fn save_template(&self, name: &str, form: &TransferForm) -> Result<()>;
}

pub struct TransferPresenterImpl<I: ?Sized, V: ?Sized> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I: ?Sized, V: ?Sized> TransferPresenterImpl<I, V>
where
    I: SessionInteractor,
    V: TransferView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I: ?Sized, V: ?Sized> TransferPresenter for TransferPresenterImpl<I, V>
where
    I: SessionInteractor,
    V: TransferView,
{
    async fn submit(&self, form: &TransferForm, template_id: Option<String>) -> Result<()> {
        let config = match self.interactor.build_transfer_config(form) {
            Ok(config) => config,
            Err(e) => {
                self.view.display_validation_error(&e).await?;
                return Ok(());
            }
        };

        let total = match config.total_amount() {
            Some(total) => total,
            None => {
                self.view
                    .display_validation_error(&ValidationError::TotalAmountOverflow)
                    .await?;
                return Ok(());
            }
        };

        self.view
            .display_processing(config.recipients.len(), total, &config.token)
            .await?;

        match self.interactor.submit_transfer(config.clone(), template_id).await {
            Ok(batch) => {
                self.view
                    .display_batch_result(&batch, total, &config.token)
                    .await?;
            }
            Err(AppError::SubmissionInFlight(_)) => {
                self.view.display_submission_in_flight().await?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    async fn save_template(&self, name: &str, form: &TransferForm) -> Result<()> {
        let config = match self.interactor.build_transfer_config(form) {
            Ok(config) => config,
            Err(e) => {
                self.view.display_validation_error(&e).await?;
                return Ok(());
            }
        };

        match self
            .interactor
            .save_template(name, TemplateConfig::Transfer(config))
            .await
        {
            Ok(template) => self.view.display_template_saved(&template).await?,
            Err(AppError::Validation(e)) => self.view.display_validation_error(&e).await?,
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }
}
