use chrono::{Duration, SecondsFormat, Utc};

/// Date input `hours` from now, formatted the way the web client stores it
pub fn hours_from_now(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339_opts(SecondsFormat::Secs, true)
}
