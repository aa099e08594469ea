use crate::model::{TimetableEntry, WeekTimetable};
use crate::temporal::{Weekday, time_of_day_key, weekday_of};
use chrono::{DateTime, TimeZone};
use log::{debug, warn};

/// Flatten a week timetable into one list, stamping each entry with the day
/// it was filed under when it does not carry its own day label
pub fn flatten(week: &WeekTimetable) -> Vec<TimetableEntry> {
    week.iter()
        .flat_map(|(day, entries)| {
            entries.iter().map(move |entry| {
                let mut entry = entry.clone();
                if entry.day_of_week.as_deref().is_none_or(|d| d.trim().is_empty()) {
                    entry.day_of_week = Some(day.clone());
                }
                entry
            })
        })
        .collect()
}

fn entry_day(entry: &TimetableEntry) -> Option<Weekday> {
    entry.day_of_week.as_deref().and_then(Weekday::from_name)
}

fn start_time(entry: &TimetableEntry) -> Option<&str> {
    entry.start_time.as_deref().filter(|s| !s.is_empty())
}

/// Entries of one day that have a start time, ascending by start time
pub fn classes_on(entries: &[TimetableEntry], day: Weekday) -> Vec<&TimetableEntry> {
    let mut classes: Vec<&TimetableEntry> = entries
        .iter()
        .filter(|e| entry_day(e) == Some(day) && start_time(e).is_some())
        .collect();
    classes.sort_by(|a, b| start_time(a).cmp(&start_time(b)));
    classes
}

/// Resolve the next class after `now`: the earliest entry later today, else
/// the first entry tomorrow. Never looks further than tomorrow.
pub fn next_class<Tz: TimeZone>(week: &WeekTimetable, now: &DateTime<Tz>) -> Option<TimetableEntry> {
    let entries = flatten(week);
    let skipped = entries
        .iter()
        .filter(|e| entry_day(e).is_none() || start_time(e).is_none())
        .count();
    if skipped > 0 {
        warn!("Skipping {} timetable entries without a valid day or start time", skipped);
    }

    let today = weekday_of(now);
    let current_time = time_of_day_key(now);

    let later_today = classes_on(&entries, today)
        .into_iter()
        .find(|e| start_time(e).is_some_and(|start| start > current_time.as_str()));
    if let Some(entry) = later_today {
        debug!("Next class is later today ({}) at {:?}", today, entry.start_time);
        return Some(entry.clone());
    }

    let tomorrow = today.next_day();
    let first_tomorrow = classes_on(&entries, tomorrow).into_iter().next().cloned();
    debug!(
        "No class left on {} after {}, first on {}: {}",
        today,
        current_time,
        tomorrow,
        first_tomorrow.is_some()
    );
    first_tomorrow
}

/// All entries of the week, Monday first, each day ascending by start time
pub fn sorted_week(week: &WeekTimetable) -> Vec<TimetableEntry> {
    let entries = flatten(week);
    Weekday::MONDAY_FIRST
        .iter()
        .flat_map(|day| classes_on(&entries, *day))
        .cloned()
        .collect()
}
