//! Total amount extraction.
//!
//! Invoices commonly list a sub-total before taxes and one or more
//! "total" rows after it; retail receipts may only carry an MRP. The
//! cascade runs in that priority order and stops at the first hit.

use super::patterns::{MRP_LABELED, MRP_LOOSE, SUB_TOTAL, TOTAL};

/// Extract the canonical total amount as a numeric string with thousands
/// separators removed. Returns `None` when no monetary label matches.
pub fn extract_total_amount(text: &str) -> Option<String> {
    if let Some(caps) = SUB_TOTAL.captures(text) {
        return Some(strip_separators(&caps[1]));
    }

    // Sub-totals precede the grand total, so the last labeled number wins.
    if let Some(caps) = TOTAL.captures_iter(text).last() {
        return Some(strip_separators(&caps[1]));
    }

    MRP_LABELED
        .captures(text)
        .or_else(|| MRP_LOOSE.captures(text))
        .map(|caps| strip_separators(&caps[1]))
}

fn strip_separators(value: &str) -> String {
    value.replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sub_total_takes_priority() {
        let text = "Sub Total: 1,234.56\nTax: 100.00\nTotal: 2,000.00";
        assert_eq!(extract_total_amount(text), Some("1234.56".to_string()));
    }

    #[test]
    fn test_last_total_wins() {
        let text = "Total: 100\nShipping: 20\nTotal: 250";
        assert_eq!(extract_total_amount(text), Some("250".to_string()));
    }

    #[test]
    fn test_mrp_fallback() {
        let text = "Item A\nMRP: 1,499\nThank you";
        assert_eq!(extract_total_amount(text), Some("1499".to_string()));
    }

    #[test]
    fn test_mrp_loose_label() {
        let text = "MRP (incl. of all taxes) 2,999";
        assert_eq!(extract_total_amount(text), Some("2999".to_string()));
    }

    #[test]
    fn test_capture_starts_at_first_digit() {
        let text = "Total ..... 45.50";
        assert_eq!(extract_total_amount(text), Some("45.50".to_string()));
    }

    #[test]
    fn test_no_label_is_none() {
        assert_eq!(extract_total_amount("just some words 12.50"), None);
    }

    #[test]
    fn test_label_and_number_split_by_newline_ignored() {
        let text = "Total\n999.99";
        assert_eq!(extract_total_amount(text), None);
    }
}
