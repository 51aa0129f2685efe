use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::chain::{SimulatedSubmitter, Submitter};
use crate::config::AppConfig;
use crate::entity::User;
use crate::interactor::session_interactor::{SessionInteractor, SessionInteractorImpl};
use crate::interactor::store::{InMemoryRepository, Repository};
use crate::interactor::ValidationRules;
use crate::presenter::{
    DashboardPresenter, DashboardPresenterImpl, SwapPresenter, SwapPresenterImpl,
    TemplatePresenter, TemplatePresenterImpl, TransferPresenter, TransferPresenterImpl,
};
use crate::router::IntentRouter;
use crate::view::{LogDashboardView, LogSwapView, LogTemplateView, LogTransferView};

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    config: AppConfig,
    session: Arc<dyn SessionInteractor>,
    repository: Arc<dyn Repository>,

    transfer_presenter: Arc<dyn TransferPresenter>,
    swap_presenter: Arc<dyn SwapPresenter>,
    template_presenter: Arc<dyn TemplatePresenter>,
    dashboard_presenter: Arc<dyn DashboardPresenter>,
}

impl ServiceContainer {
    /// Wires the session with the given collaborators and the log views.
    pub fn new(
        config: AppConfig,
        user: User,
        submitter: Arc<dyn Submitter>,
        repository: Arc<dyn Repository>,
    ) -> Self {
        let session: Arc<dyn SessionInteractor> = Arc::new(SessionInteractorImpl::new(
            user,
            ValidationRules::from(&config),
            submitter,
            repository.clone(),
        ));

        let transfer_presenter = Arc::new(TransferPresenterImpl::new(
            session.clone(),
            Arc::new(LogTransferView),
        )) as Arc<dyn TransferPresenter>;

        let swap_presenter = Arc::new(SwapPresenterImpl::new(session.clone(), Arc::new(LogSwapView)))
            as Arc<dyn SwapPresenter>;

        let template_presenter = Arc::new(TemplatePresenterImpl::new(
            session.clone(),
            Arc::new(LogTemplateView),
        )) as Arc<dyn TemplatePresenter>;

        let dashboard_presenter = Arc::new(DashboardPresenterImpl::new(
            session.clone(),
            Arc::new(LogDashboardView),
        )) as Arc<dyn DashboardPresenter>;

        Self {
            config,
            session,
            repository,
            transfer_presenter,
            swap_presenter,
            template_presenter,
            dashboard_presenter,
        }
    }

    // Accessor methods

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> Arc<dyn SessionInteractor> {
        self.session.clone()
    }

    pub fn repository(&self) -> Arc<dyn Repository> {
        self.repository.clone()
    }

    pub fn transfer_presenter(&self) -> Arc<dyn TransferPresenter> {
        self.transfer_presenter.clone()
    }

    pub fn swap_presenter(&self) -> Arc<dyn SwapPresenter> {
        self.swap_presenter.clone()
    }

    pub fn template_presenter(&self) -> Arc<dyn TemplatePresenter> {
        self.template_presenter.clone()
    }

    pub fn dashboard_presenter(&self) -> Arc<dyn DashboardPresenter> {
        self.dashboard_presenter.clone()
    }
}

/// Builds the container with the simulated submitter and in-memory storage.
pub fn create_application(config: AppConfig) -> Result<(ServiceContainer, IntentRouter)> {
    config.validate()?;

    let user = User::new(&config.wallet_address, None)
        .context("Failed to create session user")?;
    info!("Session user {} ({})", user.user_id, user.wallet_address);

    let submitter = Arc::new(SimulatedSubmitter::new(
        config.submission_delay(),
        config.simulated_failure_rate,
    )) as Arc<dyn Submitter>;
    let repository = Arc::new(InMemoryRepository::new()) as Arc<dyn Repository>;

    let services = ServiceContainer::new(config, user, submitter, repository);
    let router = IntentRouter::new(&services);

    Ok((services, router))
}
