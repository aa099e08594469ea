use crate::model::Reminder;
use crate::time_format::hours_minutes_until;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Serialize;

/// Reminders due within `[now, now + horizon_hours]`, soonest first.
/// Reminders without a timestamp cannot be ordered and are left out. A
/// horizon past the end of the calendar leaves the window open-ended.
pub fn upcoming_reminders<'a, Tz: TimeZone>(
    reminders: &'a [Reminder],
    now: &DateTime<Tz>,
    horizon_hours: u32,
) -> Vec<&'a Reminder> {
    let now = now.with_timezone(&Utc);
    let horizon = now.checked_add_signed(Duration::hours(horizon_hours as i64));
    let mut upcoming: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| {
            r.reminder_date
                .is_some_and(|at| at >= now && horizon.is_none_or(|horizon| at <= horizon))
        })
        .collect();
    upcoming.sort_by_key(|r| r.reminder_date);
    upcoming
}

/// The nearest reminder still in the future, with the time left until it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextReminder {
    pub reminder: Reminder,
    pub hours: i64,
    pub minutes: i64,
}

impl NextReminder {
    pub fn message(&self) -> String {
        format!("Upcoming: {} in {}h {}m", self.reminder.title, self.hours, self.minutes)
    }
}

/// First of the [`upcoming_reminders`]; reminders already past are skipped
pub fn next_reminder<Tz: TimeZone>(
    reminders: &[Reminder],
    now: &DateTime<Tz>,
    horizon_hours: u32,
) -> Option<NextReminder> {
    let nearest = *upcoming_reminders(reminders, now, horizon_hours).first()?;
    let at = nearest.reminder_date?;
    let (hours, minutes) = hours_minutes_until(&at, now)?;
    Some(NextReminder {
        reminder: nearest.clone(),
        hours,
        minutes,
    })
}
