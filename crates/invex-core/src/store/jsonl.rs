//! Append-only JSON-lines receipt store.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use super::{ReceiptStore, Result, next_id};
use crate::error::StoreError;
use crate::models::receipt::Receipt;
use crate::models::record::InvoiceRecord;

/// Receipt store backed by a file holding one JSON receipt per line.
///
/// Existing receipts are loaded on open and ids continue after the highest
/// stored one.
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    receipts: Mutex<Vec<Receipt>>,
}

impl JsonLinesStore {
    /// Open the store, creating the file and parent directories if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let receipts = if path.exists() {
            read_receipts(&path)?
        } else {
            File::create(&path)?;
            Vec::new()
        };

        info!("Opened receipt store {} ({} receipts)", path.display(), receipts.len());
        Ok(Self {
            path,
            receipts: Mutex::new(receipts),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Receipt>>> {
        self.receipts.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn read_receipts(path: &Path) -> Result<Vec<Receipt>> {
    let reader = BufReader::new(File::open(path)?);
    let mut receipts = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let receipt = serde_json::from_str(&line).map_err(|source| StoreError::Serialization {
            line: index + 1,
            source,
        })?;
        receipts.push(receipt);
    }

    Ok(receipts)
}

impl ReceiptStore for JsonLinesStore {
    fn insert(&self, filename: &str, record: InvoiceRecord) -> Result<Receipt> {
        let mut receipts = self.lock()?;
        let receipt = Receipt::new(next_id(&receipts), filename, record);

        let line = serde_json::to_string(&receipt).map_err(|source| StoreError::Serialization {
            line: receipts.len() + 1,
            source,
        })?;
        let mut file = OpenOptions::new().append(true).create(true).open(&self.path)?;
        writeln!(file, "{}", line)?;

        debug!("Stored receipt {} for {}", receipt.id, filename);
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reopen_continues_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("receipts.jsonl");

        {
            let store = JsonLinesStore::open(&path).unwrap();
            store.insert("a.pdf", InvoiceRecord::default()).unwrap();
            store
                .insert(
                    "b.pdf",
                    InvoiceRecord {
                        tax: Some("5.00".to_string()),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let store = JsonLinesStore::open(&path).unwrap();
        let receipts = store.list().unwrap();
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[1].record.tax, Some("5.00".to_string()));

        let third = store.insert("c.pdf", InvoiceRecord::default()).unwrap();
        assert_eq!(third.id, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipts.jsonl");
        std::fs::write(&path, "\n{oops\n").unwrap();

        let err = JsonLinesStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization { line: 2, .. }));
    }
}
