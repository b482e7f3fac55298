//! Display Formatting
//!
//! Date and currency formatting shared by the table views and the CSV export.

use chrono::NaiveDate;

/// Render an ISO date (`2024-03-05`) as `05 Mar 2024`.
///
/// Unparseable input is shown verbatim rather than hidden.
pub fn format_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d %b %Y").to_string();
    }
    // Timestamps keep their date part.
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return date.format("%d %b %Y").to_string();
        }
    }
    raw.to_string()
}

/// Format an amount in rupees with Indian digit grouping
/// (`1234567.0` -> `₹12,34,567`). Paise show only when present.
pub fn format_inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let mut rupees = amount.trunc() as u64;
    let mut paise = (amount.fract() * 100.0).round() as u64;
    if paise == 100 {
        rupees += 1;
        paise = 0;
    }
    let sign = if negative { "-" } else { "" };
    let grouped = group_indian(&rupees.to_string());
    if paise > 0 {
        format!("{sign}\u{20b9}{grouped}.{paise:02}")
    } else {
        format!("{sign}\u{20b9}{grouped}")
    }
}

/// Indian grouping: the last three digits, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut parts = vec![tail.to_string()];
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        parts.push(pair.to_string());
        head = rest;
    }
    if !head.is_empty() {
        parts.push(head.to_string());
    }
    parts.reverse();
    parts.join(",")
}

/// Whether `date` (ISO) falls strictly before `today`.
/// Unparseable dates are never overdue.
pub fn is_past(date: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(date) => date < today,
        Err(_) => false,
    }
}

/// Today's date from the browser clock.
pub fn browser_today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates_render_short_form() {
        assert_eq!(format_date("2024-03-05"), "05 Mar 2024");
        assert_eq!(format_date("2023-12-31"), "31 Dec 2023");
    }

    #[test]
    fn timestamps_keep_their_date_part() {
        assert_eq!(format_date("2024-03-05T10:30:00Z"), "05 Mar 2024");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn rupees_group_in_indian_style() {
        assert_eq!(format_inr(500.0), "\u{20b9}500");
        assert_eq!(format_inr(12_500.0), "\u{20b9}12,500");
        assert_eq!(format_inr(1_234_567.0), "\u{20b9}12,34,567");
        assert_eq!(format_inr(123_456_789.0), "\u{20b9}12,34,56,789");
    }

    #[test]
    fn paise_show_only_when_present() {
        assert_eq!(format_inr(999.5), "\u{20b9}999.50");
        assert_eq!(format_inr(0.0), "\u{20b9}0");
        assert_eq!(format_inr(100.0), "\u{20b9}100");
    }

    #[test]
    fn rounding_carries_into_rupees() {
        assert_eq!(format_inr(999.999), "\u{20b9}1,000");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside() {
        assert_eq!(format_inr(-1_500.0), "-\u{20b9}1,500");
    }

    #[test]
    fn past_is_strict() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(is_past("2024-03-04", today));
        assert!(!is_past("2024-03-05", today));
        assert!(!is_past("2024-03-06", today));
        assert!(!is_past("garbage", today));
    }
}
