//! Currency and date formatting for display.

use chrono::{NaiveDate, NaiveDateTime};

/// Groups thousands with commas and fixes two decimals: `1234.5` → `"1,234.50"`.
///
/// Non-finite amounts render as `"0.00"`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }

    let cents = (amount * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}.{:02}", if negative { "-" } else { "" }, grouped, fraction)
}

/// `format_amount` with a currency symbol in front, e.g. `"৳ 1,234.50"`.
pub fn format_money(amount: f64, symbol: &str) -> String {
    format!("{} {}", symbol, format_amount(amount))
}

/// `2020-01-01` → `"01 Jan 2020"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn format_date_time(value: NaiveDateTime) -> String {
    value.format("%d %b %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-42.1), "-42.10");
        assert_eq!(format_amount(f64::NAN), "0.00");
    }

    #[test]
    fn test_format_money_and_dates() {
        assert_eq!(format_money(1234.5, "৳"), "৳ 1,234.50");

        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(format_date(date), "01 Jan 2020");
        assert_eq!(
            format_date_time(date.and_hms_opt(15, 5, 0).unwrap()),
            "01 Jan 2020, 03:05 PM"
        );
    }
}
