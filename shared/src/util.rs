use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string with millisecond precision
/// (e.g. `2024-05-01T12:30:45.123Z`). Used for `last_modified` stamps.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
