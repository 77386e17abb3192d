//! # Display Formatting
//!
//! Pure helpers that turn domain values into UI text (en-US conventions).
//!
//! ```text
//! format_price(Money::from_cents(123456))   → "$1,234.56"
//! format_number(1234567)                    → "1,234,567"
//! truncate_text("Hello wonderful world", 6) → "Hello..."
//! format_date(2024-01-05T10:00:00Z)         → "January 5, 2024"
//! ```

use chrono::{DateTime, Utc};

use crate::money::Money;

/// Default cut-off for [`truncate_text`] in product cards.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

/// Formats money as US currency with thousands separators.
///
/// ## Example
/// ```rust
/// use storefront_core::{format::format_price, Money};
///
/// assert_eq!(format_price(Money::from_cents(123456)), "$1,234.56");
/// assert_eq!(format_price(Money::from_cents(-500)), "-$5.00");
/// ```
pub fn format_price(amount: Money) -> String {
    let sign = if amount.cents() < 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(amount.dollars().unsigned_abs()),
        amount.cents_part()
    )
}

/// Formats an integer with comma thousands separators.
pub fn format_number(n: i64) -> String {
    let grouped = group_thousands(n.unsigned_abs());
    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Cuts `text` to `max_len` characters, trims trailing whitespace of the
/// kept prefix, and appends `"..."`. Text that already fits is returned as-is.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", text[..cut].trim()),
    }
}

/// Long-form US date, e.g. `"January 5, 2024"`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Parses an RFC 3339 timestamp and formats it with [`format_date`].
///
/// Returns an empty string for blank or unparseable input.
pub fn format_date_str(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|d| format_date(&d.with_timezone(&Utc)))
        .unwrap_or_default()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Money::from_cents(0)), "$0.00");
        assert_eq!(format_price(Money::from_cents(999)), "$9.99");
        assert_eq!(format_price(Money::from_cents(123456)), "$1,234.56");
        assert_eq!(format_price(Money::from_cents(100000000)), "$1,000,000.00");
        assert_eq!(format_price(Money::from_cents(-123456)), "-$1,234.56");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(-1000), "-1,000");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("", 10), "");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_text("Hello wonderful world", 6), "Hello...");
        assert_eq!(truncate_text("héllo wörld", 4), "héll...");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(format_date(&date), "January 5, 2024");
        assert_eq!(format_date_str("2023-12-25T08:30:00Z"), "December 25, 2023");
        assert_eq!(format_date_str("not a date"), "");
        assert_eq!(format_date_str(""), "");
    }
}
