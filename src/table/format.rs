//! Cell formatters shared by the page column sets.

use chrono::{DateTime, Utc};

use crate::core::Value;

/// "Jun 18, 2024"
pub fn long_date(value: &Value) -> String {
    match value {
        Value::Date(d) => d.format("%b %d, %Y").to_string(),
        Value::Timestamp(ts) => ts.format("%b %d, %Y").to_string(),
        other => other.to_string(),
    }
}

/// "Jun 18, 2024 14:32"
pub fn date_time(value: &Value) -> String {
    with_instant(value, |ts| ts.format("%b %d, %Y %H:%M").to_string())
}

/// "Jun 18, 2024 at 14:32"
pub fn date_at_time(value: &Value) -> String {
    with_instant(value, |ts| ts.format("%b %d, %Y at %H:%M").to_string())
}

/// "Jun 18, 14:32:10"
pub fn log_time(value: &Value) -> String {
    with_instant(value, |ts| ts.format("%b %d, %H:%M:%S").to_string())
}

/// "15,420"
pub fn thousands(value: &Value) -> String {
    match value.as_i64() {
        Some(n) => group_digits(n),
        None => value.to_string(),
    }
}

pub fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Cut `text` to at most `max` characters, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

fn with_instant(value: &Value, f: impl Fn(DateTime<Utc>) -> String) -> String {
    match value.as_instant() {
        Some(ts) => f(ts),
        None => value.to_string(),
    }
}
