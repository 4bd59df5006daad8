use chrono::{DateTime, Utc};

/// Formats a stored RFC 3339 timestamp for display in bot messages.
/// Unparseable values are shown as-is rather than dropped.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| format_datetime(&dt.with_timezone(&Utc)))
        .unwrap_or_else(|_| raw.to_string())
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M %d-%m-%Y").to_string()
}
