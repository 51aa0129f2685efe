// Rendering boundary. The shipped views write to the log.
pub mod dashboard_view;
pub mod swap_view;
pub mod template_view;
pub mod transfer_view;

pub use dashboard_view::{DashboardView, LogDashboardView};
pub use swap_view::{LogSwapView, SwapView};
pub use template_view::{LogTemplateView, TemplateView};
pub use transfer_view::{LogTransferView, TransferView};
