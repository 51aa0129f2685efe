use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{ActiveView, StatusFilter};
use crate::interactor::session_interactor::SessionInteractor;
use crate::interactor::status_tracker;
use crate::view::dashboard_view::DashboardView;

#[async_trait]
pub trait DashboardPresenter: Send + Sync {
    async fn show(&self, filter: StatusFilter, batch_id: Option<&str>) -> Result<()>;
    async fn refresh(&self) -> Result<()>;
    async fn navigate(&self, view: ActiveView) -> Result<()>;
}

pub struct DashboardPresenterImpl<I: ?Sized, V: ?Sized> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I: ?Sized, V: ?Sized> DashboardPresenterImpl<I, V>
where
    I: SessionInteractor,
    V: DashboardView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I: ?Sized, V: ?Sized> DashboardPresenter for DashboardPresenterImpl<I, V>
where
    I: SessionInteractor,
    V: DashboardView,
{
    async fn show(&self, filter: StatusFilter, batch_id: Option<&str>) -> Result<()> {
        let snapshot = self.interactor.snapshot().await;
        let stats = status_tracker::transaction_stats(&snapshot.transactions);
        let transactions: Vec<_> =
            status_tracker::filter_transactions(&snapshot.transactions, filter, batch_id)
                .into_iter()
                .cloned()
                .collect();

        self.view
            .display_dashboard(&stats, &snapshot.batches, &transactions, filter)
            .await
    }

    async fn refresh(&self) -> Result<()> {
        self.interactor
            .refresh()
            .await
            .context("Failed to refresh transactions")?;
        self.show(StatusFilter::All, None).await
    }

    async fn navigate(&self, view: ActiveView) -> Result<()> {
        self.interactor.navigate(view).await;
        self.view.display_active_view(view).await
    }
}
