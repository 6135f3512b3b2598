//! Display formatting helpers
//!
//! Currency is shown in whole units with thousands separators, the way the
//! sandbox presents projections ("$1,234,567"). Dates are rendered in long
//! form using a chrono format string from [`DisplayOptions`](crate::DisplayOptions).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an amount as whole currency units with thousands separators
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{}-", symbol);
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits);

    if rounded < 0.0 {
        format!("-{}{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round half away from zero to one decimal place
///
/// `{:.1}` alone rounds exact ties to even (0.25 -> "0.2").
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a month count to one decimal place ("3.0")
pub fn format_months(months: f64) -> String {
    format!("{:.1}", round_one_decimal(months))
}

/// Format a percentage as a whole number, ties rounding up ("32.5" -> "33")
pub fn format_whole_percent(pct: f64) -> String {
    format!("{:.0}", pct.round())
}

/// Format a fraction as a percentage with one decimal ("0.652" -> "65.2%")
pub fn format_ratio_percent(ratio: f64) -> String {
    format!("{:.1}%", round_one_decimal(ratio * 100.0))
}

/// Parse an ISO-8601 timestamp (or plain date) and render it in long form
///
/// Returns `None` when the value can't be parsed.
pub fn format_long_date(raw: &str, date_format: &str) -> Option<String> {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;

    Some(date.format(date_format).to_string())
}
