//! A persisted extraction: the record plus upload metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::InvoiceRecord;

/// A stored invoice record keyed by a generated identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Identifier assigned by the store, starting at 1.
    pub id: u64,

    /// The six extracted fields, flattened into the receipt object.
    #[serde(flatten)]
    pub record: InvoiceRecord,

    /// Name of the uploaded document.
    pub filename: String,

    /// Upload time (UTC).
    pub uploaded_at: DateTime<Utc>,
}

impl Receipt {
    pub fn new(id: u64, filename: impl Into<String>, record: InvoiceRecord) -> Self {
        Self {
            id,
            record,
            filename: filename.into(),
            uploaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_receipt_json_shape() {
        let receipt = Receipt {
            id: 7,
            record: InvoiceRecord {
                total: Some("10.00".to_string()),
                ..Default::default()
            },
            filename: "march.pdf".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["total"], "10.00");
        assert!(json["supplier"].is_null());
        assert_eq!(json["filename"], "march.pdf");
        assert_eq!(json["uploaded_at"], "2024-03-01T12:00:00Z");
        assert_eq!(json.as_object().unwrap().len(), 9);

        let back: Receipt = serde_json::from_value(json).unwrap();
        assert_eq!(back, receipt);
    }
}
