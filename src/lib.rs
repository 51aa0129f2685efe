pub mod chain;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use chain::{SimulatedSubmitter, Submitter};
pub use config::AppConfig;
pub use di::{create_application, ServiceContainer};
pub use entity::*;
pub use interactor::session_interactor::{SessionInteractor, SessionInteractorImpl};
pub use interactor::store::{InMemoryRepository, Repository, UserRecords};
pub use router::{Intent, IntentRouter};
pub use utils::{validate_address, validate_amount};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
