//! Invoice date extraction.
//!
//! Scans line by line: any line mentioning "date" is a candidate, and the
//! value is often printed on the following line, so that one is tried
//! next. Day comes before month when the ordering is ambiguous.

use chrono::NaiveDate;

use super::patterns::{
    DATE_DAY_MON, DATE_DAY_MONTH_LONG, DATE_DOTTED, DATE_MONTH_DAY, DATE_NUMERIC_DMY, DATE_YMD,
};

/// Extract the first parseable date near a "date" label. Calendar-invalid
/// matches are skipped and the scan continues with the next candidate
/// line; `None` when nothing parses.
pub fn extract_invoice_date(text: &str) -> Option<NaiveDate> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if !line.to_lowercase().contains("date") {
            continue;
        }

        let mut candidates = vec![*line];
        if i + 1 < lines.len() {
            candidates.push(lines[i + 1]);
        }

        for candidate in candidates {
            if let Some(date) = match_date(candidate) {
                return Some(date);
            }
        }
    }

    None
}

/// Try the supported date shapes in priority order against one line.
fn match_date(line: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_NUMERIC_DMY.captures(line) {
        return numeric_day_first(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = DATE_YMD.captures(line) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_DOTTED.captures(line) {
        return numeric_day_first(&caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = DATE_DAY_MON.captures(line) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_DAY_MONTH_LONG.captures(line) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_MONTH_DAY.captures(line) {
        let month = month_from_name(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps[3].parse().ok()?);
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

/// Day-before-month, falling back to month-first when the day-first
/// reading is not a valid calendar date (e.g. "05/13/2023").
fn numeric_day_first(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year = expand_year(year.parse().ok()?);

    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

/// Two-digit years: 00-50 map to the 2000s, 51-99 to the 1900s.
fn expand_year(year: i32) -> i32 {
    if year < 100 {
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slash_date_is_day_first() {
        let text = "Invoice Date: 12/05/2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_impossible_day_first_swaps() {
        let text = "Date: 05/13/2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 13)));
    }

    #[test]
    fn test_iso_date() {
        let text = "Invoice date 2023-05-12";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_dotted_date() {
        let text = "Date of issue: 12.05.2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_day_mon_abbreviation() {
        let text = "Due Date: 12-May-2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_day_month_long() {
        let text = "Date: 12 May, 2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_month_day_long() {
        let text = "Date: May 12, 2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_value_on_following_line() {
        let text = "Invoice Date\n12/05/2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));
    }

    #[test]
    fn test_two_digit_year_expands() {
        let text = "Date: 12-05-23";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 5, 12)));

        let text = "Date: 12-05-99";
        assert_eq!(extract_invoice_date(text), Some(date(1999, 5, 12)));
    }

    #[test]
    fn test_invalid_match_falls_through_to_later_line() {
        // First label line carries an impossible date in both orderings;
        // the scan continues and resolves on the second label.
        let text = "Date: 33/44/2023\nsomething else\nDue date: 01/02/2023";
        assert_eq!(extract_invoice_date(text), Some(date(2023, 2, 1)));
    }

    #[test]
    fn test_no_date_label_is_none() {
        assert_eq!(extract_invoice_date("Total: 12/05/2023 paid"), None);
    }

    #[test]
    fn test_no_parseable_date_is_none() {
        assert_eq!(extract_invoice_date("Date: to be confirmed"), None);
    }
}
