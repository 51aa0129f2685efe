//! Persistence boundary.
//!
//! The session writes through on every create and transition and reads a
//! user's records back on refresh. Only an in-memory backend ships; records
//! do not outlive the process.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::entity::{AppError, Batch, Template, Transaction};

/// Everything stored for one user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRecords {
    pub templates: Vec<Template>,
    pub batches: Vec<Batch>,
    pub transactions: Vec<Transaction>,
}

#[async_trait]
pub trait Repository: Send + Sync {
    async fn save_template(&self, template: &Template) -> Result<(), AppError>;
    async fn delete_template(&self, template_id: &str) -> Result<(), AppError>;
    async fn save_batch(&self, batch: &Batch) -> Result<(), AppError>;
    async fn save_transaction(&self, transaction: &Transaction) -> Result<(), AppError>;

    /// All records owned by `user_id`, newest first.
    async fn load_user(&self, user_id: &str) -> Result<UserRecords, AppError>;
}

// Value plus the sequence number of its first insert, for stable ordering
struct Entry<T> {
    seq: u64,
    value: T,
}

/// Repository kept in process memory.
pub struct InMemoryRepository {
    seq: AtomicU64,
    templates: RwLock<HashMap<String, Entry<Template>>>,
    batches: RwLock<HashMap<String, Entry<Batch>>>,
    transactions: RwLock<HashMap<String, Entry<Transaction>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            templates: RwLock::new(HashMap::new()),
            batches: RwLock::new(HashMap::new()),
            transactions: RwLock::new(HashMap::new()),
        }
    }

    fn upsert<T>(&self, map: &mut HashMap<String, Entry<T>>, key: &str, value: T) {
        match map.get_mut(key) {
            Some(entry) => entry.value = value,
            None => {
                let seq = self.seq.fetch_add(1, Ordering::Relaxed);
                map.insert(key.to_string(), Entry { seq, value });
            }
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save_template(&self, template: &Template) -> Result<(), AppError> {
        let mut templates = self.templates.write().await;
        self.upsert(&mut *templates, &template.template_id, template.clone());
        Ok(())
    }

    async fn delete_template(&self, template_id: &str) -> Result<(), AppError> {
        let mut templates = self.templates.write().await;
        templates.remove(template_id);
        Ok(())
    }

    async fn save_batch(&self, batch: &Batch) -> Result<(), AppError> {
        let mut batches = self.batches.write().await;
        self.upsert(&mut *batches, &batch.batch_id, batch.clone());
        Ok(())
    }

    async fn save_transaction(&self, transaction: &Transaction) -> Result<(), AppError> {
        let mut transactions = self.transactions.write().await;
        self.upsert(
            &mut *transactions,
            &transaction.transaction_id,
            transaction.clone(),
        );
        Ok(())
    }

    async fn load_user(&self, user_id: &str) -> Result<UserRecords, AppError> {
        let mut templates: Vec<_> = {
            let map = self.templates.read().await;
            map.values()
                .filter(|e| e.value.user_id == user_id)
                .map(|e| (e.seq, e.value.clone()))
                .collect()
        };
        templates.sort_by(|(sa, a), (sb, b)| b.created_at.cmp(&a.created_at).then(sb.cmp(sa)));

        let mut batches: Vec<_> = {
            let map = self.batches.read().await;
            map.values()
                .filter(|e| e.value.user_id == user_id)
                .map(|e| (e.seq, e.value.clone()))
                .collect()
        };
        batches.sort_by(|(sa, a), (sb, b)| {
            b.creation_timestamp
                .cmp(&a.creation_timestamp)
                .then(sb.cmp(sa))
        });

        // Within one batch, keep creation order
        let mut transactions: Vec<_> = {
            let map = self.transactions.read().await;
            map.values()
                .filter(|e| e.value.user_id == user_id)
                .map(|e| (e.seq, e.value.clone()))
                .collect()
        };
        transactions.sort_by(|(sa, a), (sb, b)| {
            b.initiating_timestamp
                .cmp(&a.initiating_timestamp)
                .then(sa.cmp(sb))
        });

        debug!(
            "Loaded {} templates, {} batches, {} transactions for user {}",
            templates.len(),
            batches.len(),
            transactions.len(),
            user_id
        );

        Ok(UserRecords {
            templates: templates.into_iter().map(|(_, t)| t).collect(),
            batches: batches.into_iter().map(|(_, b)| b).collect(),
            transactions: transactions.into_iter().map(|(_, t)| t).collect(),
        })
    }
}
