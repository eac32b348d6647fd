//! Reusable formatting utilities for CLI output

use chrono::{DateTime, NaiveDate, Utc};

/// Placeholder for absent optional values in tables
pub const EMPTY: &str = "--";

/// Format an optional string, falling back to the placeholder
pub fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| EMPTY.to_string())
}

/// Format an optional date as YYYY-MM-DD
pub fn opt_date(value: &Option<NaiveDate>) -> String {
    value
        .map(|d| d.to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Format a UTC timestamp in the local timezone
///
/// # Example output
/// `2025-01-15 14:30`
pub fn format_datetime_local(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Format an optional UTC timestamp in the local timezone
pub fn opt_datetime_local(value: &Option<DateTime<Utc>>) -> String {
    value
        .as_ref()
        .map(format_datetime_local)
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Format fractional hours as `2h 30m`
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else {
        format!("{}m", m)
    }
}

/// Format optional fractional hours
pub fn opt_hours(hours: &Option<f64>) -> String {
    hours.map(format_hours).unwrap_or_else(|| EMPTY.to_string())
}

/// Format a cost with its currency, e.g. `150.00 USD`
pub fn format_cost(cost: f64, currency: Option<&str>) -> String {
    match currency {
        Some(currency) => format!("{:.2} {}", cost, currency),
        None => format!("{:.2}", cost),
    }
}

/// Format elapsed seconds as a clock readout, e.g. `01:30:45`
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format an active/inactive flag
pub fn format_active(is_active: bool) -> String {
    if is_active {
        "active".to_string()
    } else {
        "inactive".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(2.5), "2h 30m");
        assert_eq!(format_hours(0.25), "15m");
        assert_eq!(format_hours(0.0), "0m");
        assert_eq!(format_hours(8.0), "8h 00m");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(5445), "01:30:45");
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(-5), "00:00:00");
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(150.0, Some("USD")), "150.00 USD");
        assert_eq!(format_cost(99.5, None), "99.50");
    }

    #[test]
    fn test_opt_helpers() {
        assert_eq!(opt_str(&None), "--");
        assert_eq!(opt_str(&Some("x".to_string())), "x");
        assert_eq!(opt_date(&None), "--");
        assert_eq!(opt_hours(&Some(1.5)), "1h 30m");
    }

    #[test]
    fn test_format_active() {
        assert_eq!(format_active(true), "active");
        assert_eq!(format_active(false), "inactive");
    }
}
