//! Extracted invoice fields and pipeline output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four fields recovered from an invoice. Any field may be unresolved
/// when no heuristic matched; a missing field is `None`, never an empty
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFields {
    /// Total amount as a numeric string with thousands separators removed.
    pub total_amount: Option<String>,

    /// Invoice date; serializes in ISO (YYYY-MM-DD) form.
    pub invoice_date: Option<NaiveDate>,

    /// Account holder name.
    pub account_name: Option<String>,

    /// Registered company name.
    pub company_name: Option<String>,
}

impl InvoiceFields {
    /// True when no heuristic resolved any field.
    pub fn is_empty(&self) -> bool {
        self.total_amount.is_none()
            && self.invoice_date.is_none()
            && self.account_name.is_none()
            && self.company_name.is_none()
    }
}

/// Result of running the full pipeline over one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Reconstructed OCR text, one string per page, in page order.
    pub page_texts: Vec<String>,

    /// Extracted invoice fields.
    pub fields: InvoiceFields,

    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl PipelineOutput {
    /// All page texts joined with a visible page-break marker, as shown to
    /// users alongside the extracted fields.
    pub fn joined_text(&self) -> String {
        self.page_texts.join("\n\n--- PAGE BREAK ---\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_default_is_empty() {
        let fields = InvoiceFields::default();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_date_serializes_iso() {
        let fields = InvoiceFields {
            invoice_date: NaiveDate::from_ymd_opt(2023, 5, 12),
            ..Default::default()
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains("\"2023-05-12\""));
    }
}
