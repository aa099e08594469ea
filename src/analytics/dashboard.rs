//! One-shot aggregation of a fetched snapshot into dashboard statistics.

use crate::config::AggregationConfig;
use crate::model::{Reminder, StudySession, Task, TimetableEntry, WeekTimetable};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use serde::Serialize;

use super::activity::{Activity, recent_activity};
use super::reminders::{NextReminder, next_reminder, upcoming_reminders};
use super::sessions::{sessions_within, study_day_keys, total_duration_ms, whole_hours};
use super::streak::current_streak;
use super::subjects::{SubjectPerformance, by_subject};
use super::tasks::{count_tasks, upcoming_tasks};
use super::timetable::next_class;

/// The four collections of one fetch, taken as-is from the service
#[derive(Debug, Clone, Default)]
pub struct SnapshotInput {
    pub tasks: Vec<Task>,
    pub sessions: Vec<StudySession>,
    pub reminders: Vec<Reminder>,
    pub timetable: WeekTimetable,
}

/// Point-in-time statistics derived from one [`SnapshotInput`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    pub due_soon_tasks: usize,
    /// 0-100
    pub completion_pct: u8,
    pub study_hours: i64,
    pub current_streak: u32,
    /// Reminder count plus due-soon task count. A task with its own
    /// reminder is counted twice.
    pub upcoming_deadlines: usize,
    pub subjects: Vec<SubjectPerformance>,
    pub next_class: Option<TimetableEntry>,
    pub upcoming_tasks: Vec<Task>,
    pub upcoming_reminders: Vec<Reminder>,
    pub next_reminder: Option<NextReminder>,
    pub recent_activity: Vec<Activity>,
}

/// Build a snapshot from one batch of records.
///
/// Everything is computed against the single `now` passed in; its time zone
/// decides what "today" and the current time of day are. Records missing the
/// dates a computation needs are left out of that computation only.
pub fn aggregate<Tz: TimeZone>(
    input: &SnapshotInput,
    now: &DateTime<Tz>,
    config: &AggregationConfig,
) -> DashboardSnapshot {
    let window = config.due_soon_days;
    let counts = count_tasks(&input.tasks, now, window);

    let mut subjects = by_subject(&input.tasks);
    subjects.truncate(config.subject_limit);

    let upcoming_tasks: Vec<Task> = upcoming_tasks(&input.tasks, now, window)
        .into_iter()
        .take(config.upcoming_task_limit)
        .cloned()
        .collect();

    let recent_sessions = sessions_within(&input.sessions, now, config.study_window_days);
    let study_ms = total_duration_ms(&recent_sessions);
    let study_days = study_day_keys(&recent_sessions, &now.timezone());
    let streak = current_streak(&study_days, now, config.streak_lookback_days);

    let upcoming_reminders: Vec<Reminder> =
        upcoming_reminders(&input.reminders, now, config.reminder_horizon_hours)
            .into_iter()
            .take(config.upcoming_reminder_limit)
            .cloned()
            .collect();

    debug!(
        "Aggregated {} tasks, {} of {} sessions in window, {} reminders, {} timetable days",
        counts.total,
        recent_sessions.len(),
        input.sessions.len(),
        input.reminders.len(),
        input.timetable.len()
    );

    DashboardSnapshot {
        generated_at: now.with_timezone(&Utc),
        total_tasks: counts.total,
        completed_tasks: counts.completed,
        pending_tasks: counts.pending,
        overdue_tasks: counts.overdue,
        due_soon_tasks: counts.due_soon,
        completion_pct: counts.completion_percentage(),
        study_hours: whole_hours(study_ms),
        current_streak: streak,
        upcoming_deadlines: input.reminders.len() + counts.due_soon,
        subjects,
        next_class: next_class(&input.timetable, now),
        upcoming_tasks,
        upcoming_reminders,
        next_reminder: next_reminder(&input.reminders, now, config.reminder_horizon_hours),
        recent_activity: recent_activity(
            &input.tasks,
            &recent_sessions,
            &input.reminders,
            config.recent_activity_limit,
        ),
    }
}

/// Full subject ranking, for callers that need more than the summary
pub fn subject_performance(input: &SnapshotInput) -> Vec<SubjectPerformance> {
    by_subject(&input.tasks)
}
