use chrono::{DateTime, TimeZone, Utc};

/// Formats a moment relative to `now` as human-readable time until it
///
/// Examples:
/// - Now or past: "now"
/// - 30 seconds ahead: "in 30 seconds"
/// - 1 minute ahead: "in 1 minute"
/// - 2 hours ahead: "in 2 hours"
/// - 1 day ahead: "tomorrow"
/// - 3 days ahead: "in 3 days"
/// - 30 days ahead: "on 2025-12-10"
pub fn format_time_until<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let duration = at.signed_duration_since(now.with_timezone(&Utc));

    if duration.num_seconds() <= 0 {
        "now".to_string()
    } else if duration.num_seconds() < 60 {
        let secs = duration.num_seconds();
        format!("in {} second{}", secs, if secs == 1 { "" } else { "s" })
    } else if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        format!("in {} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        format!("in {} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else if duration.num_days() == 1 {
        "tomorrow".to_string()
    } else if duration.num_days() < 30 {
        format!("in {} days", duration.num_days())
    } else {
        format!("on {}", at.with_timezone(&now.timezone()).naive_local().format("%Y-%m-%d"))
    }
}

/// Whole hours and leftover minutes until `at`, both floored; `None` once it has passed
pub fn hours_minutes_until<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> Option<(i64, i64)> {
    let ms = at.signed_duration_since(now.with_timezone(&Utc)).num_milliseconds();
    if ms <= 0 {
        return None;
    }
    Some((ms / 3_600_000, (ms % 3_600_000) / 60_000))
}

/// Reminder badge text: "Due now" once due, otherwise "<h>h <m>m left"
pub fn format_countdown<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    match hours_minutes_until(at, now) {
        Some((hours, minutes)) => format!("{}h {}m left", hours, minutes),
        None => "Due now".to_string(),
    }
}
