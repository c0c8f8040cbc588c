//! Common regex patterns for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Monetary labels. The number may not be separated from its label by a
    // line break; [^\d\n\r]* keeps the match on one logical span.
    pub static ref SUB_TOTAL: Regex = Regex::new(
        r"(?i)sub\s*total[^\d\n\r]*([-+]?\d[\d,]*\.?\d*)"
    ).unwrap();

    pub static ref TOTAL: Regex = Regex::new(
        r"(?i)\btotal[^\d\n\r]*([-+]?\d[\d,]*\.?\d*)"
    ).unwrap();

    pub static ref MRP_LABELED: Regex = Regex::new(
        r"(?i)\bMRP[:\s]*([\d,]+)"
    ).unwrap();

    pub static ref MRP_LOOSE: Regex = Regex::new(
        r"(?i)\bMRP[^\d]*([\d,]+)"
    ).unwrap();

    // Date shapes, tried in this order per candidate line.
    pub static ref DATE_NUMERIC_DMY: Regex = Regex::new(
        r"\b(\d{2})[/-](\d{2})[/-](\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[/-](\d{1,2})[/-](\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_DOTTED: Regex = Regex::new(
        r"\b(\d{2})\.(\d{2})\.(\d{4})\b"
    ).unwrap();

    pub static ref DATE_DAY_MON: Regex = Regex::new(
        r"\b(\d{1,2})[/-]([A-Za-z]{3})[/-]?(\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_LONG: Regex = Regex::new(
        r"\b(\d{1,2})\s+([A-Za-z]{3,9}),?\s+(\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_MONTH_DAY: Regex = Regex::new(
        r"\b([A-Za-z]{3,9})\s+(\d{1,2}),?\s+(\d{2,4})\b"
    ).unwrap();

    // Name labels. \s* may cross a newline, so a value on the following
    // line is still captured; (.+) stops at the end of that line.
    pub static ref ACCOUNT_NAME: Regex = Regex::new(
        r"(?i)(?:a/c\s*name|acct\s*name|account\s*name|trade\s*name)\s*[:\-]\s*(.+)"
    ).unwrap();

    pub static ref BARE_NAME: Regex = Regex::new(
        r"(?i)\bname\b\s*[:\-]\s*(.+)"
    ).unwrap();

    // Registered-company suffixes with flexible internal spacing.
    pub static ref COMPANY_SUFFIX: Regex = Regex::new(
        r"(?i)(Pvt\.\s*Ltd\.|Private\s*Limited)"
    ).unwrap();

    pub static ref MULTI_SPACE: Regex = Regex::new(" +").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_total_matches_across_label_noise() {
        let caps = SUB_TOTAL.captures("Sub Total ....: 1,234.56").unwrap();
        assert_eq!(&caps[1], "1,234.56");
    }

    #[test]
    fn test_sub_total_does_not_cross_lines() {
        assert!(SUB_TOTAL.captures("Sub Total\n1,234.56").is_none());
    }

    #[test]
    fn test_total_requires_word_boundary() {
        assert!(TOTAL.is_match("Total: 99"));
        assert!(!TOTAL.is_match("subto tal 99"));
    }

    #[test]
    fn test_company_suffix_spacing_variants() {
        assert!(COMPANY_SUFFIX.is_match("Acme Pvt. Ltd."));
        assert!(COMPANY_SUFFIX.is_match("Acme Pvt.Ltd."));
        assert!(COMPANY_SUFFIX.is_match("Acme private  limited"));
    }

    #[test]
    fn test_account_label_variants() {
        for label in ["A/C Name", "Acct Name", "Account Name", "Trade Name"] {
            let text = format!("{}: Jane Doe", label);
            let caps = ACCOUNT_NAME.captures(&text).unwrap();
            assert_eq!(&caps[1], "Jane Doe");
        }
    }
}
