use anyhow::Result;
use async_trait::async_trait;
use batchswap::interactor::{batch_factory, transfer_interactor, ValidationRules};
use batchswap::presenter::{SwapPresenter, SwapPresenterImpl, TransferPresenter, TransferPresenterImpl};
use batchswap::view::{SwapView, TransferView};
use batchswap::{
    Batch, InMemoryRepository, RecipientForm, Repository, SessionInteractor,
    SessionInteractorImpl, SubmissionError, Submitter, SwapConfig, SwapForm, Template,
    TransactionStatus, TransferForm, TxOutcome, User, ValidationError, WorkUnit,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

const WALLET: &str = "0x9999999999999999999999999999999999999999";
const ALICE: &str = "0x1111111111111111111111111111111111111111";
const BOB: &str = "0x2222222222222222222222222222222222222222";

/// Completes every unit except transfers to the listed addresses.
#[derive(Default)]
struct FakeChain {
    failing: HashSet<String>,
}

#[async_trait]
impl Submitter for FakeChain {
    async fn submit(&self, unit: &WorkUnit) -> Result<TxOutcome, SubmissionError> {
        match unit {
            WorkUnit::Transfer { recipient, .. } if self.failing.contains(&recipient.address) => {
                Err(SubmissionError::Network("insufficient funds".to_string()))
            }
            WorkUnit::Transfer { recipient, .. } => Ok(TxOutcome {
                tx_hash: format!("0x{}", &recipient.address[2..]),
            }),
            WorkUnit::Swap(_) => Ok(TxOutcome {
                tx_hash: "0xswap".to_string(),
            }),
        }
    }
}

fn session(chain: FakeChain) -> (Arc<SessionInteractorImpl>, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::new());
    let session = SessionInteractorImpl::new(
        User::new(WALLET, None).unwrap(),
        ValidationRules::default(),
        Arc::new(chain),
        repository.clone(),
    );
    (Arc::new(session), repository)
}

fn usdc_form() -> TransferForm {
    TransferForm {
        token: "USDC".to_string(),
        recipients: vec![
            RecipientForm {
                address: ALICE.to_string(),
                amount: "100".to_string(),
                label: None,
            },
            RecipientForm {
                address: BOB.to_string(),
                amount: "50".to_string(),
                label: None,
            },
        ],
    }
}

fn same_token_swap() -> SwapForm {
    SwapForm {
        from_token: "USDC".to_string(),
        to_token: "USDC".to_string(),
        from_chain: "Base".to_string(),
        to_chain: "Ethereum".to_string(),
        amount: "10".to_string(),
        slippage_tolerance: None,
    }
}

#[test]
fn transfer_form_becomes_one_batch_with_pending_transactions() {
    let config = transfer_interactor::build_transfer_config(&usdc_form(), &ValidationRules::default())
        .unwrap();
    assert_eq!(config.total_amount(), Some(Decimal::from(150)));

    let plan = batch_factory::create_transfer_batch("user-1", &config, None, Utc::now());

    assert_eq!(plan.batch.total_transactions, 2);
    assert_eq!(plan.batch.completed_transactions, 0);
    assert_eq!(plan.batch.failed_transactions, 0);
    assert_eq!(plan.transactions.len(), 2);
    assert!(plan
        .transactions
        .iter()
        .all(|tx| tx.status == TransactionStatus::Pending && tx.batch_id == plan.batch.batch_id));
}

#[tokio::test]
async fn submitted_transfer_settles_and_is_written_through() {
    let (session, repository) = session(FakeChain::default());
    let config = session.build_transfer_config(&usdc_form()).unwrap();

    let batch = session.submit_transfer(config, None).await.unwrap();
    assert_eq!(batch.total_transactions, 2);
    assert_eq!(batch.completed_transactions, 2);
    assert!(batch.is_settled());

    let records = repository.load_user(&session.user().user_id).await.unwrap();
    assert_eq!(records.batches, vec![batch]);
    assert_eq!(records.transactions.len(), 2);
    assert!(records
        .transactions
        .iter()
        .all(|tx| tx.status == TransactionStatus::Completed && tx.tx_hash.is_some()));
}

#[tokio::test]
async fn one_failed_recipient_leaves_a_partially_failed_batch() {
    let (session, _) = session(FakeChain {
        failing: HashSet::from([BOB.to_string()]),
    });
    let config = session.build_transfer_config(&usdc_form()).unwrap();

    let batch = session.submit_transfer(config, None).await.unwrap();
    assert_eq!(batch.completed_transactions, 1);
    assert_eq!(batch.failed_transactions, 1);
    assert!(batch.is_partially_failed());

    let snapshot = session.snapshot().await;
    let failed = snapshot
        .transactions
        .iter()
        .find(|tx| tx.status == TransactionStatus::Failed)
        .unwrap();
    assert_eq!(
        failed.error_message.as_deref(),
        Some("Network error: insufficient funds")
    );
    assert!(failed.tx_hash.is_none());
    assert!(failed.completion_timestamp.is_none());
}

#[tokio::test]
async fn same_token_swap_is_rejected_before_any_batch_exists() {
    let (session, repository) = session(FakeChain::default());

    let result = session.build_swap_config(&same_token_swap());
    assert_eq!(result, Err(ValidationError::SameToken("USDC".to_string())));

    let snapshot = session.snapshot().await;
    assert!(snapshot.batches.is_empty());
    assert!(snapshot.transactions.is_empty());

    let records = repository.load_user(&session.user().user_id).await.unwrap();
    assert!(records.batches.is_empty());
}

/// Records what the presenters pushed to the screen.
#[derive(Default)]
struct RecordingView {
    events: Mutex<Vec<String>>,
}

impl RecordingView {
    fn record(&self, event: String) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransferView for RecordingView {
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()> {
        self.record(format!("error: {}", error))
    }

    async fn display_processing(&self, recipients: usize, total: Decimal, token: &str) -> Result<()> {
        self.record(format!("processing {} {} to {}", total, token, recipients))
    }

    async fn display_batch_result(&self, batch: &Batch, _total: Decimal, _token: &str) -> Result<()> {
        self.record(format!(
            "result {}/{}",
            batch.completed_transactions, batch.total_transactions
        ))
    }

    async fn display_submission_in_flight(&self) -> Result<()> {
        self.record("in flight".to_string())
    }

    async fn display_template_saved(&self, template: &Template) -> Result<()> {
        self.record(format!("saved {}", template.name))
    }
}

#[async_trait]
impl SwapView for RecordingView {
    async fn display_validation_error(&self, error: &ValidationError) -> Result<()> {
        self.record(format!("error: {}", error))
    }

    async fn display_processing(&self, config: &SwapConfig) -> Result<()> {
        self.record(format!("swapping {}", config.amount))
    }

    async fn display_swap_result(&self, batch: &Batch, _config: &SwapConfig) -> Result<()> {
        self.record(format!("swap result {}", batch.completed_transactions))
    }

    async fn display_submission_in_flight(&self) -> Result<()> {
        self.record("in flight".to_string())
    }

    async fn display_template_saved(&self, template: &Template) -> Result<()> {
        self.record(format!("saved {}", template.name))
    }
}

#[tokio::test]
async fn transfer_presenter_reports_progress_and_result() {
    let (session, _) = session(FakeChain::default());
    let view = Arc::new(RecordingView::default());
    let presenter = TransferPresenterImpl::new(session.clone(), view.clone());

    presenter.submit(&usdc_form(), None).await.unwrap();
    presenter.save_template("Payroll", &usdc_form()).await.unwrap();

    assert_eq!(
        view.events(),
        vec![
            "processing 150 USDC to 2".to_string(),
            "result 2/2".to_string(),
            "saved Payroll".to_string(),
        ]
    );
    assert_eq!(session.snapshot().await.templates.len(), 1);
}

#[tokio::test]
async fn swap_presenter_shows_validation_errors_without_submitting() {
    let (session, _) = session(FakeChain::default());
    let view = Arc::new(RecordingView::default());
    let presenter = SwapPresenterImpl::new(session.clone(), view.clone());

    presenter.submit(&same_token_swap(), None).await.unwrap();

    assert_eq!(
        view.events(),
        vec!["error: Source and target tokens must be different (USDC)".to_string()]
    );
    assert!(session.snapshot().await.batches.is_empty());
}
