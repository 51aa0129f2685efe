pub mod dashboard_presenter;
pub mod swap_presenter;
pub mod template_presenter;
pub mod transfer_presenter;

pub use dashboard_presenter::{DashboardPresenter, DashboardPresenterImpl};
pub use swap_presenter::{SwapPresenter, SwapPresenterImpl};
pub use template_presenter::{TemplatePresenter, TemplatePresenterImpl};
pub use transfer_presenter::{TransferPresenter, TransferPresenterImpl};
