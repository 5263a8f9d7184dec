//! Display formatting for resource magnitudes and durations.
//!
//! Incremental games show quantities across many orders of magnitude: plain
//! numbers while values are readable, scientific notation once they are not.
//! The thresholds follow the display rules of the original game UI.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const PLAIN_LIMIT: u32 = 1_000;
const ROUNDED_LIMIT: u32 = 1_000_000;

/// Renders a quantity for display.
///
/// - below 1e3: up to two decimal places, trailing zeros trimmed
/// - below 1e6: rounded to a whole number
/// - otherwise: scientific notation with a two-decimal mantissa
pub fn format(value: Decimal) -> String {
    let magnitude = value.abs();

    if magnitude < Decimal::from(PLAIN_LIMIT) {
        return value.round_dp(2).normalize().to_string();
    }
    if magnitude < Decimal::from(ROUNDED_LIMIT) {
        return value.round_dp(0).normalize().to_string();
    }

    let digits = magnitude.trunc().to_string();
    let exponent = digits.len() - 1;
    let mantissa = {
        let mut m = String::new();
        m.push_str(&digits[..1]);
        let tail: String = digits[1..].chars().take(2).collect();
        let tail = tail.trim_end_matches('0');
        if !tail.is_empty() {
            m.push('.');
            m.push_str(tail);
        }
        m
    };
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{mantissa}e{exponent}")
}

/// Renders a duration given in seconds, largest unit first.
///
/// Used for offline-time reports. Sub-second durations render as `0s`.
pub fn format_time(seconds: Decimal) -> String {
    let total = seconds.trunc().to_u64().unwrap_or(0);

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{secs}s"));
    }
    parts.join(" ")
}
