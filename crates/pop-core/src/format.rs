//! Display formatting helpers
//!
//! Brazilian locale formatting for currency, phone numbers and dates.
//! Everything works on plain values; the UI fetches "now" from the
//! browser clock and passes it in.

use chrono::{DateTime, NaiveDate};

/// Formats a value as BRL currency: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction:02}")
}

/// Formats a commission fraction as the percentage the form edits
/// (`0.05` -> `5%`).
pub fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{}%", percent.round() as i64)
    } else {
        format!("{percent:.1}%")
    }
}

/// Masks a Brazilian phone number: `(xx) x xxxx-xxxx` for mobile numbers,
/// `(xx) xxxx-xxxx` for landlines. Other lengths come back unmasked.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => format!(
            "({}) {} {}-{}",
            &digits[..2],
            &digits[2..3],
            &digits[3..7],
            &digits[7..]
        ),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => digits,
    }
}

/// Formats an epoch-milliseconds instant as `dd/mm/yyyy hh:mm`.
pub fn format_epoch_ms(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Parses the `yyyy-mm-dd` value of a date input.
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Converts a date-input value to the API's `dd/mm/yyyy` form.
pub fn input_date_to_br(value: &str) -> Option<String> {
    parse_input_date(value).map(|d| d.format("%d/%m/%Y").to_string())
}

/// Converts the API's `dd/mm/yyyy` form back to a date-input value.
pub fn br_date_to_input(value: &str) -> Option<String> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

/// Converts a date-input value to epoch milliseconds at midnight UTC,
/// the unit the report endpoints expect.
pub fn input_date_to_epoch_ms(value: &str) -> Option<i64> {
    parse_input_date(value)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl_groups_thousands() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(3.5), "R$ 3,50");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-12.3), "-R$ 12,30");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.05), "5%");
        assert_eq!(format_percent(0.125), "12.5%");
    }

    #[test]
    fn test_format_phone_masks() {
        assert_eq!(format_phone("11987654321"), "(11) 9 8765-4321");
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
        // Partial input stays unmasked instead of producing garbage.
        assert_eq!(format_phone("119"), "119");
        assert_eq!(format_phone("(11) 9 8765-4321"), "(11) 9 8765-4321");
    }

    #[test]
    fn test_date_conversions() {
        assert_eq!(input_date_to_br("2026-03-09").as_deref(), Some("09/03/2026"));
        assert_eq!(br_date_to_input("09/03/2026").as_deref(), Some("2026-03-09"));
        assert_eq!(input_date_to_br("not-a-date"), None);
        assert_eq!(
            input_date_to_epoch_ms("1970-01-02"),
            Some(24 * 60 * 60 * 1000)
        );
    }

    #[test]
    fn test_format_epoch_ms() {
        assert_eq!(format_epoch_ms(0), "01/01/1970 00:00");
        assert_eq!(format_epoch_ms(i64::MAX), "-");
    }
}
