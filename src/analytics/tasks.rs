use crate::model::Task;
use crate::temporal::local_date;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::cmp::Reverse;

/// Derived status of a task relative to a reference time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Completed,
    Overdue,
    DueSoon,
    Pending,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
            TaskStatus::DueSoon => "due-soon",
            TaskStatus::Pending => "pending",
        }
    }
}

/// Classification of one task against a fixed `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskClassification {
    pub is_completed: bool,
    pub is_overdue: bool,
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
}

impl TaskClassification {
    /// Due within `[now, now + window_days]` and not completed. A window
    /// reaching past the last representable date has no upper bound.
    pub fn is_due_soon(&self, window_days: u32) -> bool {
        if self.is_completed {
            return false;
        }
        match self.due_date {
            Some(due) => {
                let window_end = self.now.checked_add_signed(Duration::days(window_days as i64));
                due >= self.now && window_end.is_none_or(|end| due <= end)
            }
            None => false,
        }
    }

    pub fn status(&self, window_days: u32) -> TaskStatus {
        if self.is_completed {
            TaskStatus::Completed
        } else if self.is_overdue {
            TaskStatus::Overdue
        } else if self.is_due_soon(window_days) {
            TaskStatus::DueSoon
        } else {
            TaskStatus::Pending
        }
    }
}

/// A task is completed when its status reads "completed" (any case) OR its
/// completion flag is set. Either one is enough.
pub fn is_completed(task: &Task) -> bool {
    let status_completed = task
        .status
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("completed"));
    status_completed || task.is_completed
}

pub fn classify<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> TaskClassification {
    let now = now.with_timezone(&Utc);
    let is_completed = is_completed(task);
    let is_overdue = !is_completed && task.due_date.is_some_and(|due| due < now);
    TaskClassification {
        is_completed,
        is_overdue,
        due_date: task.due_date,
        now,
    }
}

/// Due-soon tasks, soonest first. Tasks due at the same instant are ordered
/// by priority, highest first, with unspecified priority last.
pub fn upcoming_tasks<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    now: &DateTime<Tz>,
    window_days: u32,
) -> Vec<&'a Task> {
    let mut upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|t| classify(t, now).is_due_soon(window_days))
        .collect();
    upcoming.sort_by_key(|t| (t.due_date, Reverse(t.priority)));
    upcoming
}

/// Every task carrying a due date, earliest first, whatever its status
pub fn tasks_by_due_date(tasks: &[Task]) -> Vec<&Task> {
    let mut dated: Vec<&Task> = tasks.iter().filter(|t| t.due_date.is_some()).collect();
    dated.sort_by_key(|t| t.due_date);
    dated
}

/// Tasks due on `day` as seen in `tz`, earliest first
pub fn tasks_on<'a, Tz: TimeZone>(tasks: &'a [Task], day: NaiveDate, tz: &Tz) -> Vec<&'a Task> {
    let mut on_day: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date.is_some_and(|due| local_date(&due, tz) == day))
        .collect();
    on_day.sort_by_key(|t| t.due_date);
    on_day
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub due_soon: usize,
}

impl TaskCounts {
    pub fn completion_percentage(&self) -> u8 {
        completion_percentage(self.completed, self.total)
    }
}

pub fn count_tasks<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>, window_days: u32) -> TaskCounts {
    tasks.iter().fold(TaskCounts::default(), |mut counts, task| {
        let classification = classify(task, now);
        counts.total += 1;
        if classification.is_completed {
            counts.completed += 1;
        } else {
            counts.pending += 1;
        }
        if classification.is_overdue {
            counts.overdue += 1;
        }
        if classification.is_due_soon(window_days) {
            counts.due_soon += 1;
        }
        counts
    })
}

/// `round(completed / total * 100)`, 0 for an empty group
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round().min(100.0) as u8
}
