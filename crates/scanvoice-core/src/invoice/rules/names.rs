//! Account and company name extraction.

use super::patterns::{ACCOUNT_NAME, BARE_NAME, COMPANY_SUFFIX, MULTI_SPACE};

/// Extract the account holder name: a specific label ("a/c name",
/// "acct name", "account name", "trade name") followed by a colon or
/// hyphen, with the rest of the line as the value. Falls back to a bare
/// "name" label. `None` when no label matches.
pub fn extract_account_name(text: &str) -> Option<String> {
    ACCOUNT_NAME
        .captures(text)
        .or_else(|| BARE_NAME.captures(text))
        .map(|caps| caps[1].trim().to_string())
}

/// Extract the registered company name: the first line whose
/// alphanumeric-only lowercase form ends in "pvtltd" or "privatelimited",
/// or, failing that, the last line carrying a company suffix. Lines
/// containing an excluded company token are skipped entirely.
pub fn extract_company_name(text: &str, excluded: &[String]) -> Option<String> {
    let cleaned = MULTI_SPACE.replace_all(text, " ");
    let mut company = None;

    for line in cleaned.lines() {
        if !COMPANY_SUFFIX.is_match(line) {
            continue;
        }

        let lowered = line.to_lowercase();
        if excluded.iter().any(|token| lowered.contains(token)) {
            continue;
        }

        let name = line.trim().to_string();
        let canonical: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        company = Some(name);

        // A suffix-terminated line is the registered name itself, not a
        // sentence mentioning it; stop looking.
        if canonical.ends_with("pvtltd") || canonical.ends_with("privatelimited") {
            break;
        }
    }

    company
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn excluded() -> Vec<String> {
        vec!["ashoka builders".to_string()]
    }

    #[test]
    fn test_account_name_labeled() {
        let text = "A/C Name: Jane Doe\nBank: Example";
        assert_eq!(extract_account_name(text), Some("Jane Doe".to_string()));
    }

    #[test]
    fn test_account_name_hyphen_separator() {
        let text = "Trade Name - Acme Traders";
        assert_eq!(extract_account_name(text), Some("Acme Traders".to_string()));
    }

    #[test]
    fn test_account_name_bare_fallback() {
        let text = "Name: John Smith";
        assert_eq!(extract_account_name(text), Some("John Smith".to_string()));
    }

    #[test]
    fn test_account_name_absent_without_label() {
        assert_eq!(extract_account_name("no labels here"), None);
    }

    #[test]
    fn test_company_suffix_line() {
        let text = "Invoice\nABC Pvt. Ltd.\nTotal: 100";
        assert_eq!(
            extract_company_name(text, &excluded()),
            Some("ABC Pvt. Ltd.".to_string())
        );
    }

    #[test]
    fn test_company_private_limited_variant() {
        let text = "Supplied by Acme Private Limited";
        assert_eq!(
            extract_company_name(text, &excluded()),
            Some("Supplied by Acme Private Limited".to_string())
        );
    }

    #[test]
    fn test_excluded_company_skipped() {
        let text = "Ashoka Builders Pvt. Ltd.\nReal Seller Pvt. Ltd.";
        assert_eq!(
            extract_company_name(text, &excluded()),
            Some("Real Seller Pvt. Ltd.".to_string())
        );
    }

    #[test]
    fn test_exact_suffix_preferred_over_mid_sentence() {
        let text = "Payment to XYZ Pvt. Ltd. is due\nXYZ Logistics Pvt. Ltd.\nFooter Pvt. Ltd. note";
        assert_eq!(
            extract_company_name(text, &excluded()),
            Some("XYZ Logistics Pvt. Ltd.".to_string())
        );
    }

    #[test]
    fn test_loose_fallback_keeps_last_match() {
        let text = "Mention of One Pvt. Ltd. here\nAnd Two Pvt. Ltd. there";
        assert_eq!(
            extract_company_name(text, &excluded()),
            Some("And Two Pvt. Ltd. there".to_string())
        );
    }

    #[test]
    fn test_only_excluded_company_is_none() {
        let text = "Ashoka Builders Pvt. Ltd.";
        assert_eq!(extract_company_name(text, &excluded()), None);
    }
}
