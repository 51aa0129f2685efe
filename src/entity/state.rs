use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entity::{Batch, Template, Transaction};
use crate::interactor::template_store::TemplateStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Dashboard,
    Transfer,
    Swap,
    History,
    Templates,
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveView::Dashboard => write!(f, "dashboard"),
            ActiveView::Transfer => write!(f, "transfer"),
            ActiveView::Swap => write!(f, "swap"),
            ActiveView::History => write!(f, "history"),
            ActiveView::Templates => write!(f, "templates"),
        }
    }
}

/// Whole session state. Mutated only through the functions in `interactor::reducer`.
///
/// Templates, batches and transactions are kept newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub active_view: ActiveView,
    pub templates: TemplateStore,
    pub batches: Vec<Batch>,
    pub transactions: Vec<Transaction>,
    /// Views whose form has a submission in flight
    pub in_flight: HashSet<ActiveView>,
}

impl AppState {
    pub fn is_in_flight(&self, view: ActiveView) -> bool {
        self.in_flight.contains(&view)
    }

    pub fn batch(&self, batch_id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.batch_id == batch_id)
    }

    pub fn batch_transactions(&self, batch_id: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.batch_id == batch_id)
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            active_view: self.active_view,
            templates: self.templates.all().to_vec(),
            batches: self.batches.clone(),
            transactions: self.transactions.clone(),
        }
    }
}

/// Read-only copy of the session handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub active_view: ActiveView,
    pub templates: Vec<Template>,
    pub batches: Vec<Batch>,
    pub transactions: Vec<Transaction>,
}
