use crate::model::StudySession;
use crate::temporal::{date_key, duration_ms};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::{BTreeMap, HashSet};

const MS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// Sum of valid session durations in milliseconds. Active sessions and
/// sessions ending before they start contribute nothing. No date filtering
/// is applied here.
pub fn total_duration_ms(sessions: &[StudySession]) -> i64 {
    sessions
        .iter()
        .map(|s| duration_ms(s.start_time.as_ref(), s.end_time.as_ref()))
        .sum()
}

/// Milliseconds rounded to the nearest whole hour
pub fn whole_hours(total_ms: i64) -> i64 {
    (total_ms as f64 / MS_PER_HOUR).round() as i64
}

/// Distinct local-day keys of every session with a start time
pub fn study_day_keys<Tz: TimeZone>(sessions: &[StudySession], tz: &Tz) -> HashSet<String> {
    sessions
        .iter()
        .filter_map(|s| s.start_time.as_ref())
        .map(|start| date_key(start, tz))
        .collect()
}

/// Sessions that started within `[now - days, now]`, or any time up to
/// `now` when the window reaches before the first representable date
pub fn sessions_within<Tz: TimeZone>(
    sessions: &[StudySession],
    now: &DateTime<Tz>,
    days: u32,
) -> Vec<StudySession> {
    let end = now.with_timezone(&Utc);
    let start = end.checked_sub_signed(Duration::days(days as i64));
    sessions
        .iter()
        .filter(|s| {
            s.start_time
                .is_some_and(|t| t <= end && start.is_none_or(|start| t >= start))
        })
        .cloned()
        .collect()
}

/// Total valid duration per subject, in milliseconds
pub fn duration_by_subject(sessions: &[StudySession]) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for session in sessions {
        let ms = duration_ms(session.start_time.as_ref(), session.end_time.as_ref());
        *totals.entry(session.subject_or_default().to_string()).or_insert(0) += ms;
    }
    totals
}

/// Minutes a session lasted: the recorded duration when the service supplies
/// one, otherwise the rounded gap between start and end
pub fn duration_minutes(session: &StudySession) -> Option<i64> {
    if let Some(recorded) = session.duration {
        return Some(recorded.round() as i64);
    }
    match (session.start_time, session.end_time) {
        (Some(start), Some(end)) => {
            Some(((end - start).num_milliseconds() as f64 / 60_000.0).round() as i64)
        }
        _ => None,
    }
}
