//! View models for the dashboard screens.
//!
//! Nothing here talks to the network directly; the chart controllers go
//! through [`MetricsSource`](crate::source::MetricsSource).

pub mod analysis;
pub mod cards;
pub mod chart;
pub mod time_of_day;
pub mod trend;

/// Local timestamp formatting, e.g. "3/2/2024, 8:00:00 AM"
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// 12345 -> "12,345"
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
