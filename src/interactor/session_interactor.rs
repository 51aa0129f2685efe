use async_trait::async_trait;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chain::Submitter;
use crate::entity::{
    ActiveView, AppError, AppState, Batch, SessionSnapshot, SwapConfig, SwapForm, Template,
    TemplateConfig, TemplateFilter, TemplateForm, TransferConfig, TransferForm, User,
    ValidationError,
};
use crate::interactor::batch_factory::BatchPlan;
use crate::interactor::store::Repository;
use crate::interactor::{reducer, swap_interactor, transfer_interactor, ValidationRules};

#[async_trait]
pub trait SessionInteractor: Send + Sync {
    fn build_transfer_config(&self, form: &TransferForm) -> Result<TransferConfig, ValidationError>;
    fn build_swap_config(&self, form: &SwapForm) -> Result<SwapConfig, ValidationError>;

    /// Creates a batch for `config` and runs every transfer in it.
    ///
    /// Per-transaction failures are recorded on the transactions; the only
    /// error returned is a submission already in flight for the transfer form.
    async fn submit_transfer(
        &self,
        config: TransferConfig,
        template_id: Option<String>,
    ) -> Result<Batch, AppError>;

    async fn submit_swap(
        &self,
        config: SwapConfig,
        template_id: Option<String>,
    ) -> Result<Batch, AppError>;

    async fn save_template(&self, name: &str, config: TemplateConfig) -> Result<Template, AppError>;
    async fn delete_template(&self, template_id: &str) -> Result<(), AppError>;
    async fn use_template(&self, template_id: &str) -> Result<TemplateForm, AppError>;
    async fn list_templates(&self, filter: TemplateFilter, query: &str) -> Vec<Template>;
    async fn navigate(&self, view: ActiveView);
    async fn refresh(&self) -> Result<SessionSnapshot, AppError>;
    async fn snapshot(&self) -> SessionSnapshot;
    async fn is_submitting(&self, view: ActiveView) -> bool;
}

pub struct SessionInteractorImpl {
    user: User,
    rules: ValidationRules,
    state: Mutex<AppState>,
    submitter: Arc<dyn Submitter>,
    repository: Arc<dyn Repository>,
}

impl SessionInteractorImpl {
    pub fn new(
        user: User,
        rules: ValidationRules,
        submitter: Arc<dyn Submitter>,
        repository: Arc<dyn Repository>,
    ) -> Self {
        Self {
            user,
            rules,
            state: Mutex::new(AppState::default()),
            submitter,
            repository,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    // Runs a reducer under the state lock; the state is only replaced on success
    async fn reduce<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(AppState) -> Result<(AppState, T), AppError> + Send,
    {
        let mut state = self.state.lock().await;
        let (next, output) = f(state.clone())?;
        *state = next;
        Ok(output)
    }

    /// Applies a status change and writes the transaction and its batch through.
    /// Errors are logged so one bad unit cannot stop its siblings.
    async fn transition<F>(&self, transaction_id: &str, f: F)
    where
        F: FnOnce(AppState) -> Result<AppState, AppError> + Send,
    {
        let records = {
            let mut state = self.state.lock().await;
            match f(state.clone()) {
                Ok(next) => {
                    *state = next;
                    let transaction = state
                        .transactions
                        .iter()
                        .find(|t| t.transaction_id == transaction_id)
                        .cloned();
                    let batch = transaction
                        .as_ref()
                        .and_then(|t| state.batch(&t.batch_id).cloned());
                    transaction.zip(batch)
                }
                Err(e) => {
                    error!("Failed to update transaction {}: {}", transaction_id, e);
                    None
                }
            }
        };

        if let Some((transaction, batch)) = records {
            if let Err(e) = self.repository.save_transaction(&transaction).await {
                error!("Failed to persist transaction {}: {}", transaction_id, e);
            }
            if let Err(e) = self.repository.save_batch(&batch).await {
                error!("Failed to persist batch {}: {}", batch.batch_id, e);
            }
        }
    }

    async fn run_plan(&self, view: ActiveView, plan: BatchPlan) -> Result<Batch, AppError> {
        let batch_id = plan.batch.batch_id.clone();
        info!(
            "Submitting batch {} ({}) with {} transactions",
            batch_id, plan.batch.description, plan.batch.total_transactions
        );

        if let Err(e) = self.repository.save_batch(&plan.batch).await {
            error!("Failed to persist batch {}: {}", batch_id, e);
        }
        for transaction in &plan.transactions {
            if let Err(e) = self.repository.save_transaction(transaction).await {
                error!(
                    "Failed to persist transaction {}: {}",
                    transaction.transaction_id, e
                );
            }
        }

        // Preflight: rejected units fail without ever being sent
        let mut accepted = Vec::with_capacity(plan.units.len());
        for (transaction_id, unit) in plan.units {
            match self.submitter.preflight(&unit).await {
                Ok(()) => {
                    self.transition(&transaction_id, |s| {
                        reducer::mark_processing(s, &transaction_id, Utc::now())
                    })
                    .await;
                    accepted.push((transaction_id, unit));
                }
                Err(e) => {
                    warn!("Preflight rejected {}: {}", unit, e);
                    self.transition(&transaction_id, |s| {
                        reducer::reject_unit(s, &transaction_id, e, Utc::now())
                    })
                    .await;
                }
            }
        }

        let mut in_flight: FuturesUnordered<_> = accepted
            .iter()
            .map(|(transaction_id, unit)| async move {
                (transaction_id, self.submitter.submit(unit).await)
            })
            .collect();

        while let Some((transaction_id, outcome)) = in_flight.next().await {
            if let Err(e) = &outcome {
                warn!("Transaction {} failed: {}", transaction_id, e);
            }
            self.transition(transaction_id, |s| {
                reducer::apply_outcome(s, transaction_id, outcome, Utc::now())
            })
            .await;
        }

        let mut state = self.state.lock().await;
        *state = reducer::finish_submission(state.clone(), view);
        let batch = state
            .batch(&batch_id)
            .cloned()
            .ok_or_else(|| AppError::Storage(format!("Batch {} disappeared", batch_id)))?;

        info!(
            "Batch {} finished: {} completed, {} failed of {}",
            batch.batch_id,
            batch.completed_transactions,
            batch.failed_transactions,
            batch.total_transactions
        );
        Ok(batch)
    }
}

#[async_trait]
impl SessionInteractor for SessionInteractorImpl {
    fn build_transfer_config(&self, form: &TransferForm) -> Result<TransferConfig, ValidationError> {
        transfer_interactor::build_transfer_config(form, &self.rules)
    }

    fn build_swap_config(&self, form: &SwapForm) -> Result<SwapConfig, ValidationError> {
        swap_interactor::build_swap_config(form, &self.rules)
    }

    async fn submit_transfer(
        &self,
        config: TransferConfig,
        template_id: Option<String>,
    ) -> Result<Batch, AppError> {
        // Configs can be assembled by hand, so they are checked again here
        let config = self.build_transfer_config(&config.to_form())?;
        let user_id = self.user.user_id.clone();
        let plan = self
            .reduce(|s| {
                reducer::begin_transfer(s, &user_id, &config, template_id.as_deref(), Utc::now())
            })
            .await?;

        self.run_plan(ActiveView::Transfer, plan).await
    }

    async fn submit_swap(
        &self,
        config: SwapConfig,
        template_id: Option<String>,
    ) -> Result<Batch, AppError> {
        let config = self.build_swap_config(&config.to_form())?;
        let user_id = self.user.user_id.clone();
        let plan = self
            .reduce(|s| {
                reducer::begin_swap(s, &user_id, &config, template_id.as_deref(), Utc::now())
            })
            .await?;

        self.run_plan(ActiveView::Swap, plan).await
    }

    async fn save_template(&self, name: &str, config: TemplateConfig) -> Result<Template, AppError> {
        let config = match config.to_form() {
            TemplateForm::Transfer(form) => {
                TemplateConfig::Transfer(self.build_transfer_config(&form)?)
            }
            TemplateForm::Swap(form) => TemplateConfig::Swap(self.build_swap_config(&form)?),
        };

        // Storage first; the session only changes once the write succeeded
        let mut state = self.state.lock().await;
        let (next, template) =
            reducer::save_template(state.clone(), &self.user.user_id, name, config, Utc::now())?;
        self.repository.save_template(&template).await?;
        *state = next;

        Ok(template)
    }

    async fn delete_template(&self, template_id: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let next = reducer::delete_template(state.clone(), template_id);
        self.repository.delete_template(template_id).await?;
        *state = next;

        Ok(())
    }

    async fn use_template(&self, template_id: &str) -> Result<TemplateForm, AppError> {
        self.reduce(|s| reducer::use_template(s, template_id)).await
    }

    async fn list_templates(&self, filter: TemplateFilter, query: &str) -> Vec<Template> {
        let state = self.state.lock().await;
        state
            .templates
            .list(filter, query)
            .into_iter()
            .cloned()
            .collect()
    }

    async fn navigate(&self, view: ActiveView) {
        let mut state = self.state.lock().await;
        *state = reducer::navigate(state.clone(), view);
    }

    async fn refresh(&self) -> Result<SessionSnapshot, AppError> {
        let records = self.repository.load_user(&self.user.user_id).await?;
        let mut state = self.state.lock().await;
        *state = reducer::refresh(state.clone(), records);
        Ok(state.snapshot())
    }

    async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot()
    }

    async fn is_submitting(&self, view: ActiveView) -> bool {
        self.state.lock().await.is_in_flight(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{
        Recipient, RecipientForm, SubmissionError, TransactionStatus, TxOutcome, WorkUnit,
    };
    use crate::entity::Transaction;
    use crate::interactor::store::{InMemoryRepository, UserRecords};
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Semaphore;

    const WALLET: &str = "0x9999999999999999999999999999999999999999";

    /// Fails transfers to listed addresses, rejects others at preflight.
    #[derive(Default)]
    struct ScriptedSubmitter {
        failing: HashSet<String>,
        rejected: HashSet<String>,
        gate: Option<Arc<Semaphore>>,
    }

    fn address_of(unit: &WorkUnit) -> String {
        match unit {
            WorkUnit::Transfer { recipient, .. } => recipient.address.clone(),
            WorkUnit::Swap(config) => config.from_token.clone(),
        }
    }

    #[async_trait]
    impl Submitter for ScriptedSubmitter {
        async fn preflight(&self, unit: &WorkUnit) -> Result<(), SubmissionError> {
            if self.rejected.contains(&address_of(unit)) {
                return Err(SubmissionError::Rejected("blocked recipient".to_string()));
            }
            Ok(())
        }

        async fn submit(&self, unit: &WorkUnit) -> Result<TxOutcome, SubmissionError> {
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            let address = address_of(unit);
            if self.failing.contains(&address) {
                return Err(SubmissionError::Network("connection reset".to_string()));
            }
            Ok(TxOutcome {
                tx_hash: format!("0xhash-{}", address),
            })
        }
    }

    fn session(submitter: ScriptedSubmitter) -> (Arc<SessionInteractorImpl>, Arc<InMemoryRepository>) {
        let repository = Arc::new(InMemoryRepository::new());
        let session = SessionInteractorImpl::new(
            User::new(WALLET, None).unwrap(),
            ValidationRules::default(),
            Arc::new(submitter),
            repository.clone(),
        );
        (Arc::new(session), repository)
    }

    /// In-memory storage whose template writes can be switched to fail.
    #[derive(Default)]
    struct FlakyRepository {
        inner: InMemoryRepository,
        fail_templates: AtomicBool,
    }

    impl FlakyRepository {
        fn check(&self) -> Result<(), AppError> {
            if self.fail_templates.load(Ordering::SeqCst) {
                return Err(AppError::Storage("disk full".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Repository for FlakyRepository {
        async fn save_template(&self, template: &Template) -> Result<(), AppError> {
            self.check()?;
            self.inner.save_template(template).await
        }

        async fn delete_template(&self, template_id: &str) -> Result<(), AppError> {
            self.check()?;
            self.inner.delete_template(template_id).await
        }

        async fn save_batch(&self, batch: &Batch) -> Result<(), AppError> {
            self.inner.save_batch(batch).await
        }

        async fn save_transaction(&self, transaction: &Transaction) -> Result<(), AppError> {
            self.inner.save_transaction(transaction).await
        }

        async fn load_user(&self, user_id: &str) -> Result<UserRecords, AppError> {
            self.inner.load_user(user_id).await
        }
    }

    fn addr(n: u8) -> String {
        format!("0x{}", format!("{:x}", n % 16).repeat(40))
    }

    fn transfer(addresses: &[String]) -> TransferConfig {
        TransferConfig {
            token: "USDC".to_string(),
            recipients: addresses
                .iter()
                .map(|a| Recipient {
                    address: a.clone(),
                    amount: "10".to_string(),
                    label: None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn all_units_complete() {
        let (session, repository) = session(ScriptedSubmitter::default());
        let batch = session
            .submit_transfer(transfer(&[addr(1), addr(2)]), None)
            .await
            .unwrap();

        assert_eq!(batch.total_transactions, 2);
        assert_eq!(batch.completed_transactions, 2);
        assert!(batch.is_settled());
        assert!(!session.is_submitting(ActiveView::Transfer).await);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.active_view, ActiveView::History);
        for tx in &snapshot.transactions {
            assert_eq!(tx.status, TransactionStatus::Completed);
            assert!(tx.tx_hash.as_deref().unwrap().starts_with("0xhash-"));
            assert!(tx.completion_timestamp.is_some());
        }

        // write-through: storage matches the session
        let records = repository.load_user(&session.user().user_id).await.unwrap();
        assert_eq!(records.batches, snapshot.batches);
        assert_eq!(records.transactions, snapshot.transactions);
    }

    #[tokio::test]
    async fn partial_failure_does_not_abort_siblings() {
        let submitter = ScriptedSubmitter {
            failing: HashSet::from([addr(2)]),
            rejected: HashSet::from([addr(3)]),
            ..Default::default()
        };
        let (session, _) = session(submitter);

        let batch = session
            .submit_transfer(transfer(&[addr(1), addr(2), addr(3)]), None)
            .await
            .unwrap();

        assert_eq!(batch.completed_transactions, 1);
        assert_eq!(batch.failed_transactions, 2);

        let snapshot = session.snapshot().await;
        let statuses: Vec<_> = snapshot
            .transactions
            .iter()
            .map(|t| (t.status, t.tx_hash.is_some(), t.error_message.clone()))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (TransactionStatus::Completed, true, None),
                (
                    TransactionStatus::Failed,
                    false,
                    Some("Network error: connection reset".to_string())
                ),
                (
                    TransactionStatus::Failed,
                    false,
                    Some("Rejected: blocked recipient".to_string())
                ),
            ]
        );
    }

    #[tokio::test]
    async fn second_submission_is_refused_while_first_is_in_flight() {
        let gate = Arc::new(Semaphore::new(0));
        let submitter = ScriptedSubmitter {
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let (session, _) = session(submitter);

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.submit_transfer(transfer(&[addr(1)]), None).await })
        };

        while !session.is_submitting(ActiveView::Transfer).await {
            tokio::task::yield_now().await;
        }

        let err = session
            .submit_transfer(transfer(&[addr(1)]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SubmissionInFlight(_)));
        assert_eq!(session.snapshot().await.batches.len(), 1);

        gate.add_permits(1);
        let batch = first.await.unwrap().unwrap();
        assert_eq!(batch.completed_transactions, 1);
        assert!(!session.is_submitting(ActiveView::Transfer).await);
    }

    #[tokio::test]
    async fn swap_with_same_tokens_never_creates_a_batch() {
        let (session, _) = session(ScriptedSubmitter::default());
        let form = SwapForm {
            from_token: "USDC".to_string(),
            to_token: "USDC".to_string(),
            from_chain: "Base".to_string(),
            to_chain: "Polygon".to_string(),
            amount: "10".to_string(),
            slippage_tolerance: None,
        };

        assert!(session.build_swap_config(&form).is_err());
        let snapshot = session.snapshot().await;
        assert!(snapshot.batches.is_empty() && snapshot.transactions.is_empty());
    }

    #[tokio::test]
    async fn templates_round_trip_through_storage() {
        let (session, _) = session(ScriptedSubmitter::default());
        let form = TransferForm {
            token: "ETH".to_string(),
            recipients: vec![RecipientForm {
                address: addr(4),
                amount: "0.5".to_string(),
                label: Some("Dana".to_string()),
            }],
        };
        let config = session.build_transfer_config(&form).unwrap();

        let template = session
            .save_template("Pay Dana", TemplateConfig::Transfer(config))
            .await
            .unwrap();
        assert_eq!(
            session.use_template(&template.template_id).await.unwrap(),
            TemplateForm::Transfer(form)
        );

        // refresh reloads from storage
        let snapshot = session.refresh().await.unwrap();
        assert_eq!(snapshot.templates, vec![template.clone()]);

        session.delete_template("unknown").await.unwrap();
        assert_eq!(session.refresh().await.unwrap().templates.len(), 1);

        session.delete_template(&template.template_id).await.unwrap();
        assert!(session.refresh().await.unwrap().templates.is_empty());
    }

    #[tokio::test]
    async fn template_id_is_stamped_on_transactions() {
        let (session, _) = session(ScriptedSubmitter::default());
        let swap = SwapConfig {
            from_token: "ETH".to_string(),
            to_token: "USDC".to_string(),
            from_chain: "Base".to_string(),
            to_chain: "Base".to_string(),
            amount: "1".to_string(),
            slippage_tolerance: 0.5,
        };

        let batch = session
            .submit_swap(swap, Some("tpl-9".to_string()))
            .await
            .unwrap();
        assert_eq!(batch.total_transactions, 1);

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.transactions[0].template_id.as_deref(), Some("tpl-9"));
        assert_eq!(snapshot.transactions[0].tx_hash.as_deref(), Some("0xhash-ETH"));
    }

    #[tokio::test]
    async fn unvalidated_configs_are_refused() {
        let (session, repository) = session(ScriptedSubmitter::default());

        let empty = TransferConfig {
            token: "USDC".to_string(),
            recipients: vec![],
        };
        let err = session.submit_transfer(empty, None).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NoRecipients)
        ));

        let mut bad_row = transfer(&[addr(1)]);
        bad_row.recipients[0].address = "nope".to_string();
        bad_row.recipients[0].amount = "-5".to_string();
        let err = session.submit_transfer(bad_row, None).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidAddress { index: 0, .. })
        ));

        let same_token = SwapConfig {
            from_token: "ETH".to_string(),
            to_token: "ETH".to_string(),
            from_chain: "Base".to_string(),
            to_chain: "Base".to_string(),
            amount: "1".to_string(),
            slippage_tolerance: 0.5,
        };
        let err = session.submit_swap(same_token, None).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::SameToken(ref token)) if token == "ETH"
        ));

        let mut unsupported = transfer(&[addr(1)]);
        unsupported.token = "DOGE".to_string();
        assert!(session
            .save_template("Doge run", TemplateConfig::Transfer(unsupported))
            .await
            .is_err());

        let snapshot = session.snapshot().await;
        assert!(snapshot.batches.is_empty());
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.templates.is_empty());
        assert!(!session.is_submitting(ActiveView::Transfer).await);
        assert!(!session.is_submitting(ActiveView::Swap).await);

        let records = repository.load_user(&session.user().user_id).await.unwrap();
        assert_eq!(records, UserRecords::default());
    }

    #[tokio::test]
    async fn failed_template_writes_leave_the_session_unchanged() {
        let repository = Arc::new(FlakyRepository::default());
        let session = SessionInteractorImpl::new(
            User::new(WALLET, None).unwrap(),
            ValidationRules::default(),
            Arc::new(ScriptedSubmitter::default()),
            repository.clone(),
        );

        let kept = session
            .save_template("Kept", TemplateConfig::Transfer(transfer(&[addr(1)])))
            .await
            .unwrap();

        repository.fail_templates.store(true, Ordering::SeqCst);

        let err = session
            .save_template("Lost", TemplateConfig::Transfer(transfer(&[addr(2)])))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(ref reason) if reason == "disk full"));
        assert_eq!(session.snapshot().await.templates, vec![kept.clone()]);

        assert!(session.delete_template(&kept.template_id).await.is_err());
        assert_eq!(session.snapshot().await.templates, vec![kept.clone()]);

        // storage and session still agree
        repository.fail_templates.store(false, Ordering::SeqCst);
        assert_eq!(session.refresh().await.unwrap().templates, vec![kept]);
    }
}
