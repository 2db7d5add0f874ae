//! Receipt persistence.
//!
//! Stores assign identifiers starting at 1 and never reuse them.

mod jsonl;

pub use jsonl::JsonLinesStore;

use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::receipt::Receipt;
use crate::models::record::InvoiceRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Trait for receipt stores shared between request handlers.
pub trait ReceiptStore: Send + Sync {
    /// Persist a record and return the stored receipt with its new id.
    fn insert(&self, filename: &str, record: InvoiceRecord) -> Result<Receipt>;

    /// Look up a receipt by id.
    fn get(&self, id: u64) -> Result<Option<Receipt>>;

    /// All receipts in insertion order.
    fn list(&self) -> Result<Vec<Receipt>>;
}

/// In-memory receipt store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    receipts: Mutex<Vec<Receipt>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Receipt>>> {
        self.receipts.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ReceiptStore for MemoryStore {
    fn insert(&self, filename: &str, record: InvoiceRecord) -> Result<Receipt> {
        let mut receipts = self.lock()?;
        let receipt = Receipt::new(next_id(&receipts), filename, record);
        receipts.push(receipt.clone());
        Ok(receipt)
    }

    fn get(&self, id: u64) -> Result<Option<Receipt>> {
        Ok(self.lock()?.iter().find(|r| r.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Receipt>> {
        Ok(self.lock()?.clone())
    }
}

pub(crate) fn next_id(receipts: &[Receipt]) -> u64 {
    receipts.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
