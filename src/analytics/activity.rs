use crate::model::{Reminder, StudySession, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

use super::tasks::is_completed;

const RECENT_TASKS: usize = 3;
const RECENT_SESSIONS: usize = 2;
const RECENT_REMINDERS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    TaskCompleted,
    TaskUpdated,
    StudySession,
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub action: String,
    pub at: Option<DateTime<Utc>>,
}

fn task_activity(task: &Task) -> Activity {
    let title = if task.title.trim().is_empty() { "Task" } else { task.title.as_str() };
    let (kind, verb) = if is_completed(task) {
        (ActivityKind::TaskCompleted, "Completed")
    } else {
        (ActivityKind::TaskUpdated, "Updated")
    };
    Activity {
        kind,
        action: format!("{} {}", verb, title),
        at: task.updated_at.or(task.created_at).or(task.due_date),
    }
}

fn session_activity(session: &StudySession) -> Activity {
    Activity {
        kind: ActivityKind::StudySession,
        action: format!("Study session - {}", session.subject_or_default()),
        at: session.end_time.or(session.start_time),
    }
}

fn reminder_activity(reminder: &Reminder) -> Activity {
    Activity {
        kind: ActivityKind::Reminder,
        action: format!("Reminder: {}", reminder.title),
        at: reminder.reminder_date,
    }
}

/// Newest-first feed: the latest tasks, then the latest sessions, then the
/// first reminder, cut to `limit`. Undated records sort after dated ones.
pub fn recent_activity(
    tasks: &[Task],
    sessions: &[StudySession],
    reminders: &[Reminder],
    limit: usize,
) -> Vec<Activity> {
    let mut task_feed: Vec<Activity> = tasks.iter().map(task_activity).collect();
    task_feed.sort_by_key(|a| Reverse(a.at));
    let mut session_feed: Vec<Activity> = sessions.iter().map(session_activity).collect();
    session_feed.sort_by_key(|a| Reverse(a.at));

    task_feed
        .into_iter()
        .take(RECENT_TASKS)
        .chain(session_feed.into_iter().take(RECENT_SESSIONS))
        .chain(reminders.iter().take(RECENT_REMINDERS).map(reminder_activity))
        .take(limit)
        .collect()
}
