use crate::model::StudySession;
use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use std::collections::HashSet;

use super::sessions::study_day_keys;

/// Dates from `now`'s local day backward, `days` of them, most recent first
fn days_back<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> impl Iterator<Item = NaiveDate> {
    let today = now.naive_local().date();
    (0..days as i64).map_while(move |offset| today.checked_sub_signed(Duration::days(offset)))
}

/// Count consecutive study days walking backward from today.
///
/// The walk starts on `now`'s local day and stops at the first day missing
/// from `study_days`, or after `lookback_days` days. There is no grace day:
/// if nothing was studied today the streak is 0.
pub fn current_streak<Tz: TimeZone>(
    study_days: &HashSet<String>,
    now: &DateTime<Tz>,
    lookback_days: u32,
) -> u32 {
    days_back(now, lookback_days)
        .take_while(|day| study_days.contains(&day.format("%Y-%m-%d").to_string()))
        .count() as u32
}

/// Streak computed straight from sessions, keyed on each session's local start day
pub fn streak_from_sessions<Tz: TimeZone>(
    sessions: &[StudySession],
    now: &DateTime<Tz>,
    lookback_days: u32,
) -> u32 {
    let keys = study_day_keys(sessions, &now.timezone());
    current_streak(&keys, now, lookback_days)
}

/// Days within the last `days` (today included) that have no study, most
/// recent first
pub fn missing_days<Tz: TimeZone>(
    study_days: &HashSet<String>,
    now: &DateTime<Tz>,
    days: u32,
) -> Vec<String> {
    days_back(now, days)
        .map(|day| day.format("%Y-%m-%d").to_string())
        .filter(|key| !study_days.contains(key))
        .collect()
}
