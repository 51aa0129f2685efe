use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

lazy_static! {
    static ref ADDRESS_RE: Regex = Regex::new(r"^0x[0-9a-fA-F]{40}$").unwrap();
    // Leading decimal number; anything after it is ignored
    static ref AMOUNT_RE: Regex =
        Regex::new(r"^\s*([+-]?)(\d+(?:\.\d+)?|\.\d+)(?:[eE]([+-]?\d+))?").unwrap();
}

// Validate an EVM-style address (0x + 40 hex digits, no checksum)
pub fn validate_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

/// Extracts the leading number of a user-entered amount.
///
/// Trailing text is dropped (`"10abc"` gives `"10"`), a leading `+` is
/// removed and a bare fraction gains its zero (`".5"` gives `"0.5"`).
pub fn normalize_amount(amount: &str) -> Option<String> {
    let caps = AMOUNT_RE.captures(amount)?;

    let sign = if &caps[1] == "-" { "-" } else { "" };
    let digits = &caps[2];
    let zero = if digits.starts_with('.') { "0" } else { "" };
    let exponent = caps
        .get(3)
        .map(|e| format!("e{}", e.as_str().trim_start_matches('+')))
        .unwrap_or_default();

    Some(format!("{}{}{}{}", sign, zero, digits, exponent))
}

// Validate a user-entered amount: its leading number must be finite and above zero
pub fn validate_amount(amount: &str) -> bool {
    match normalize_amount(amount).map(|n| n.parse::<f64>()) {
        Some(Ok(value)) => value.is_finite() && value > 0.0,
        _ => false,
    }
}

/// Parses an amount into an exact decimal.
///
/// Accepts plain (`"100.5"`) and scientific (`"1e3"`) notation. Returns
/// `None` when the value does not fit a `Decimal` exactly enough to be
/// non-zero.
pub fn parse_amount(amount: &str) -> Option<Decimal> {
    let amount = normalize_amount(amount)?;
    let value = Decimal::from_str(&amount)
        .or_else(|_| Decimal::from_scientific(&amount))
        .ok()?;

    if value.is_zero() && validate_amount(&amount) {
        return None;
    }
    Some(value)
}

/// Illustrative swap output before slippage, at the fixed demo rate.
pub const MOCK_EXCHANGE_RATE: f64 = 1.05;

/// Minimum received for a swap of `amount` at the demo rate, after
/// `slippage` percent. `None` for an invalid amount.
pub fn estimate_swap_output(amount: &str, slippage: f64) -> Option<f64> {
    if !validate_amount(amount) {
        return None;
    }
    let value = normalize_amount(amount)?.parse::<f64>().ok()?;
    Some(value * MOCK_EXCHANGE_RATE * (1.0 - slippage / 100.0))
}

// Generate a collision-resistant identifier
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// Shorten address for display
pub fn format_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }

    let start = &address[..6];
    let end = &address[address.len() - 4..];

    format!("{}...{}", start, end)
}

// Format amount with K/M suffixes for large values
pub fn format_amount(amount: &str, decimals: usize) -> String {
    let value = match amount.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => return "0".to_string(),
    };

    if value >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K", value / 1_000.0)
    } else {
        format!("{:.*}", decimals, value)
    }
}

// Relative time for display ("Just now", "5m ago", ...)
pub fn format_timestamp(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", days)
    }
}
