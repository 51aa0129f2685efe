//! One pure function per intent over `AppState`.
//!
//! Each takes the current state by value and returns the next one, so every
//! intent can be tested without the async session around it.

use chrono::{DateTime, Utc};

use crate::entity::{
    ActiveView, AppError, AppState, SubmissionError, SwapConfig, Template, TemplateConfig,
    TemplateForm, TransferConfig, TxOutcome,
};
use crate::interactor::batch_factory::{self, BatchPlan};
use crate::interactor::status_tracker::{self, StatusUpdate};
use crate::interactor::store::UserRecords;
use crate::interactor::template_store::TemplateStore;

pub fn navigate(mut state: AppState, view: ActiveView) -> AppState {
    state.active_view = view;
    state
}

/// Creates the transfer batch and marks the transfer form as in flight.
pub fn begin_transfer(
    state: AppState,
    user_id: &str,
    config: &TransferConfig,
    template_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(AppState, BatchPlan), AppError> {
    let plan = batch_factory::create_transfer_batch(user_id, config, template_id, now);
    let state = begin_submission(state, ActiveView::Transfer, &plan)?;
    Ok((state, plan))
}

/// Creates the swap batch and marks the swap form as in flight.
pub fn begin_swap(
    state: AppState,
    user_id: &str,
    config: &SwapConfig,
    template_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(AppState, BatchPlan), AppError> {
    let plan = batch_factory::create_swap_batch(user_id, config, template_id, now);
    let state = begin_submission(state, ActiveView::Swap, &plan)?;
    Ok((state, plan))
}

fn begin_submission(
    mut state: AppState,
    view: ActiveView,
    plan: &BatchPlan,
) -> Result<AppState, AppError> {
    if state.is_in_flight(view) {
        return Err(AppError::SubmissionInFlight(view.to_string()));
    }
    state.in_flight.insert(view);

    state.batches.insert(0, plan.batch.clone());

    let mut transactions = plan.transactions.clone();
    transactions.append(&mut state.transactions);
    state.transactions = transactions;

    state.active_view = ActiveView::History;
    Ok(state)
}

pub fn mark_processing(
    state: AppState,
    transaction_id: &str,
    now: DateTime<Utc>,
) -> Result<AppState, AppError> {
    transition(state, transaction_id, StatusUpdate::Processing, now)
}

/// Records the submitter's answer for one processing transaction.
pub fn apply_outcome(
    state: AppState,
    transaction_id: &str,
    outcome: Result<TxOutcome, SubmissionError>,
    now: DateTime<Utc>,
) -> Result<AppState, AppError> {
    let update = match outcome {
        Ok(TxOutcome { tx_hash }) => StatusUpdate::Completed { tx_hash },
        Err(e) => StatusUpdate::Failed {
            error_message: e.to_string(),
        },
    };
    transition(state, transaction_id, update, now)
}

/// Fails a transaction that never got submitted.
pub fn reject_unit(
    state: AppState,
    transaction_id: &str,
    error: SubmissionError,
    now: DateTime<Utc>,
) -> Result<AppState, AppError> {
    transition(
        state,
        transaction_id,
        StatusUpdate::Failed {
            error_message: error.to_string(),
        },
        now,
    )
}

pub fn finish_submission(mut state: AppState, view: ActiveView) -> AppState {
    state.in_flight.remove(&view);
    state
}

fn transition(
    mut state: AppState,
    transaction_id: &str,
    update: StatusUpdate,
    now: DateTime<Utc>,
) -> Result<AppState, AppError> {
    let transaction = state
        .transactions
        .iter_mut()
        .find(|t| t.transaction_id == transaction_id)
        .ok_or_else(|| AppError::TransactionNotFound(transaction_id.to_string()))?;

    status_tracker::apply_update(transaction, update, now)?;
    let batch_id = transaction.batch_id.clone();

    if let Some(batch) = state.batches.iter_mut().find(|b| b.batch_id == batch_id) {
        status_tracker::recompute_batch(batch, &state.transactions);
    }

    Ok(state)
}

pub fn save_template(
    mut state: AppState,
    user_id: &str,
    name: &str,
    config: TemplateConfig,
    now: DateTime<Utc>,
) -> Result<(AppState, Template), AppError> {
    let template = state.templates.create(user_id, name, config, now)?;
    Ok((state, template))
}

pub fn delete_template(mut state: AppState, template_id: &str) -> AppState {
    state.templates.delete(template_id);
    state
}

/// Loads a template into its form and switches to the matching view.
///
/// The template itself is left as it is; saving the form again creates a new one.
pub fn use_template(
    mut state: AppState,
    template_id: &str,
) -> Result<(AppState, TemplateForm), AppError> {
    let form = state
        .templates
        .get(template_id)
        .map(|t| t.config.to_form())
        .ok_or_else(|| AppError::TemplateNotFound(template_id.to_string()))?;

    state.active_view = match form {
        TemplateForm::Transfer(_) => ActiveView::Transfer,
        TemplateForm::Swap(_) => ActiveView::Swap,
    };
    Ok((state, form))
}

/// Replaces templates, batches and transactions with freshly loaded records.
/// The active view and in-flight flags are kept.
pub fn refresh(mut state: AppState, records: UserRecords) -> AppState {
    state.templates = TemplateStore::from_templates(records.templates);
    state.batches = records.batches;
    state.transactions = records.transactions;
    state
}
