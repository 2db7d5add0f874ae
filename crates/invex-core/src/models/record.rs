//! The flat invoice record produced by extraction.

use serde::{Deserialize, Serialize};

/// Fields extracted from one invoice.
///
/// Every field is either the raw token as found in the text or absent. Values
/// are never parsed into numbers or dates, and never defaulted. Serializes to
/// an object with exactly these six keys, absent values as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Best-matching supplier line (normalized text).
    pub supplier: Option<String>,

    /// Invoice number digits.
    pub invoice_number: Option<String>,

    /// Date substring exactly as written.
    pub invoice_date: Option<String>,

    /// Amount before tax.
    pub subtotal: Option<String>,

    /// Tax amount.
    pub tax: Option<String>,

    /// Invoice total.
    pub total: Option<String>,
}

/// Names of the record's fields, in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceField {
    Supplier,
    InvoiceNumber,
    InvoiceDate,
    Subtotal,
    Tax,
    Total,
}

impl InvoiceField {
    /// All fields, in serialization order.
    pub const ALL: [InvoiceField; 6] = [
        InvoiceField::Supplier,
        InvoiceField::InvoiceNumber,
        InvoiceField::InvoiceDate,
        InvoiceField::Subtotal,
        InvoiceField::Tax,
        InvoiceField::Total,
    ];

    /// JSON key of the field.
    pub fn name(self) -> &'static str {
        match self {
            InvoiceField::Supplier => "supplier",
            InvoiceField::InvoiceNumber => "invoice_number",
            InvoiceField::InvoiceDate => "invoice_date",
            InvoiceField::Subtotal => "subtotal",
            InvoiceField::Tax => "tax",
            InvoiceField::Total => "total",
        }
    }
}

impl std::fmt::Display for InvoiceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl InvoiceRecord {
    /// Value of a single field.
    pub fn get(&self, field: InvoiceField) -> Option<&str> {
        let value = match field {
            InvoiceField::Supplier => &self.supplier,
            InvoiceField::InvoiceNumber => &self.invoice_number,
            InvoiceField::InvoiceDate => &self.invoice_date,
            InvoiceField::Subtotal => &self.subtotal,
            InvoiceField::Tax => &self.tax,
            InvoiceField::Total => &self.total,
        };
        value.as_deref()
    }

    /// `(name, value)` pairs in serialization order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        InvoiceField::ALL
            .into_iter()
            .map(move |field| (field.name(), self.get(field)))
    }

    /// Number of present fields.
    pub fn found_count(&self) -> usize {
        self.fields().filter(|(_, value)| value.is_some()).count()
    }

    /// True when no field was found.
    pub fn is_empty(&self) -> bool {
        self.found_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_all_six_keys() {
        let record = InvoiceRecord {
            invoice_number: Some("12345".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();

        assert_eq!(object.len(), 6);
        for field in InvoiceField::ALL {
            assert!(keys.contains(&field.name()));
        }
        assert_eq!(json["invoice_number"], "12345");
        assert!(json["supplier"].is_null());
    }

    #[test]
    fn test_serialization_order() {
        let text = serde_json::to_string(&InvoiceRecord::default()).unwrap();
        assert_eq!(
            text,
            r#"{"supplier":null,"invoice_number":null,"invoice_date":null,"subtotal":null,"tax":null,"total":null}"#
        );
    }

    #[test]
    fn test_field_access() {
        let record = InvoiceRecord {
            tax: Some("5.00".to_string()),
            total: Some("105.00".to_string()),
            ..Default::default()
        };

        assert_eq!(record.get(InvoiceField::Tax), Some("5.00"));
        assert_eq!(record.get(InvoiceField::Supplier), None);
        assert_eq!(record.found_count(), 2);
        assert!(!record.is_empty());
        assert!(InvoiceRecord::default().is_empty());
        assert_eq!(InvoiceField::InvoiceDate.to_string(), "invoice_date");
    }
}
