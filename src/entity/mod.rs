mod app_error;
mod batch;
mod state;
mod swap;
mod template;
mod token;
mod transaction;
mod transfer;
mod user;
mod work_unit;

pub use app_error::{AppError, SubmissionError, ValidationError};
pub use batch::Batch;
pub use state::{ActiveView, AppState, SessionSnapshot};
pub use swap::{SwapConfig, SwapForm};
pub use template::{Template, TemplateConfig, TemplateFilter, TemplateForm, TemplateType};
pub use token::{ChainInfo, TokenInfo};
pub use transaction::{StatusFilter, Transaction, TransactionStats, TransactionStatus, TransactionType};
pub use transfer::{Recipient, RecipientForm, TransferConfig, TransferForm};
pub use user::User;
pub use work_unit::{TxOutcome, WorkUnit};
