//! Field extraction over reconstructed OCR text.

use tracing::debug;

use super::rules::{
    extract_account_name, extract_company_name, extract_invoice_date, extract_total_amount,
};
use crate::models::config::ExtractionConfig;
use crate::models::fields::InvoiceFields;

/// Applies the field heuristics to reconstructed text. A pure function of
/// its input: identical text always yields identical fields, and a field
/// with no matching heuristic is absent rather than an error.
pub struct FieldParser {
    config: ExtractionConfig,
}

impl FieldParser {
    /// Create a parser with the given extraction configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract fields from per-page texts, joined with newlines.
    pub fn parse_pages(&self, pages: &[String]) -> InvoiceFields {
        self.parse(&pages.join("\n"))
    }

    /// Extract the four invoice fields from a single text.
    pub fn parse(&self, text: &str) -> InvoiceFields {
        let text = normalize(text);

        let fields = InvoiceFields {
            total_amount: extract_total_amount(&text),
            invoice_date: extract_invoice_date(&text),
            account_name: extract_account_name(&text),
            company_name: extract_company_name(&text, &self.config.excluded_companies),
        };

        debug!(
            "Extracted fields: total={:?} date={:?} account={:?} company={:?}",
            fields.total_amount, fields.invoice_date, fields.account_name, fields.company_name
        );

        fields
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

/// Correct a known OCR misrecognition: "involce" for "invoice", in both
/// the lowercase and capitalized form the engine produces.
fn normalize(text: &str) -> String {
    text.replace("involce", "invoice").replace("Involce", "invoice")
}
