//! Form Validation
//!
//! Client-side checks run before any mutation request is sent. The server
//! validates again; these exist so obvious mistakes never leave the page.

use regex::Regex;
use std::sync::LazyLock;

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());
static PAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static AADHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());

/// Ten digits, Indian mobile range.
pub fn valid_phone(value: &str) -> bool {
    PHONE.is_match(value.trim())
}

/// PAN card format, case-insensitive on input.
pub fn valid_pan(value: &str) -> bool {
    PAN.is_match(&value.trim().to_uppercase())
}

/// Twelve digits; spaces between groups are tolerated.
pub fn valid_aadhar(value: &str) -> bool {
    AADHAR.is_match(&value.trim().replace(' ', ""))
}

/// Purchase plan percentages must cover the whole price.
pub fn shares_total_100(percents: &[f64]) -> bool {
    (percents.iter().sum::<f64>() - 100.0).abs() < 0.01
}

/// A failed field check, keyed by the input it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> FieldError {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// Validate the client form fields. Empty result means the form may submit.
pub fn client_form_errors(name: &str, phone: &str, pan: &str, aadhar: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if !valid_phone(phone) {
        errors.push(FieldError::new("phone", "Enter a valid 10-digit mobile number"));
    }
    if !valid_pan(pan) {
        errors.push(FieldError::new("pan", "Enter a valid PAN (e.g. ABCDE1234F)"));
    }
    if !valid_aadhar(aadhar) {
        errors.push(FieldError::new("aadhar", "Enter a valid 12-digit Aadhar number"));
    }
    errors
}

/// Validate purchase plan rows (`label`, `percent` as typed).
pub fn plan_errors(rows: &[(String, String)]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if rows.is_empty() {
        errors.push(FieldError::new("plan", "Add at least one installment"));
        return errors;
    }
    let mut percents = Vec::with_capacity(rows.len());
    for (label, percent) in rows {
        if label.trim().is_empty() {
            errors.push(FieldError::new("plan", "Every installment needs a label"));
            break;
        }
        match percent.trim().parse::<f64>() {
            Ok(value) if value > 0.0 => percents.push(value),
            _ => {
                errors.push(FieldError::new("plan", "Percentages must be positive numbers"));
                break;
            }
        }
    }
    if errors.is_empty() && !shares_total_100(&percents) {
        errors.push(FieldError::new("plan", "Installment percentages must total 100"));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_requires_indian_mobile_format() {
        assert!(valid_phone("9876543210"));
        assert!(valid_phone(" 7000000001 "));
        assert!(!valid_phone("1234567890"));
        assert!(!valid_phone("98765"));
        assert!(!valid_phone("98765432101"));
        assert!(!valid_phone(""));
    }

    #[test]
    fn pan_accepts_lowercase_input() {
        assert!(valid_pan("ABCDE1234F"));
        assert!(valid_pan("abcde1234f"));
        assert!(!valid_pan("ABC1234567"));
        assert!(!valid_pan("ABCDE12345"));
    }

    #[test]
    fn aadhar_tolerates_grouped_digits() {
        assert!(valid_aadhar("123456789012"));
        assert!(valid_aadhar("1234 5678 9012"));
        assert!(!valid_aadhar("12345678901"));
        assert!(!valid_aadhar("1234-5678-9012"));
    }

    #[test]
    fn shares_must_cover_the_full_price() {
        assert!(shares_total_100(&[50.0, 30.0, 20.0]));
        assert!(shares_total_100(&[33.33, 33.33, 33.34]));
        assert!(!shares_total_100(&[50.0, 30.0]));
        assert!(!shares_total_100(&[]));
    }

    #[test]
    fn valid_client_form_passes() {
        let errors = client_form_errors("Ravi Kumar", "9876543210", "ABCDE1234F", "123456789012");
        assert!(errors.is_empty());
    }

    #[test]
    fn each_bad_field_is_reported_once() {
        let errors = client_form_errors("", "12345", "nope", "123");
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "phone", "pan", "aadhar"]);
    }

    #[test]
    fn plan_rows_must_parse_and_total_100() {
        let good = vec![
            ("Booking".to_string(), "20".to_string()),
            ("Registration".to_string(), "80".to_string()),
        ];
        assert!(plan_errors(&good).is_empty());

        let short = vec![("Booking".to_string(), "20".to_string())];
        assert_eq!(plan_errors(&short)[0].field, "plan");

        let garbled = vec![("Booking".to_string(), "twenty".to_string())];
        assert!(!plan_errors(&garbled).is_empty());

        assert!(!plan_errors(&[]).is_empty());
    }
}
