use crate::analytics::DashboardSnapshot;
use crate::config::AggregationConfig;
use crate::model::{EntryType, Task, TimetableEntry};
use crate::temporal::weekday_of;
use crate::time_format::{format_countdown, format_time_until};
use chrono::{DateTime, TimeZone, Utc};
use colored::Colorize;
use std::fmt;

struct Painter {
    color: bool,
}

impl Painter {
    fn heading(&self, text: &str) -> String {
        let underline = "-".repeat(text.chars().count());
        if self.color {
            format!("{}\n{}", text.bold(), underline)
        } else {
            format!("{}\n{}", text, underline)
        }
    }

    fn good(&self, text: String) -> String {
        if self.color { text.green().to_string() } else { text }
    }

    fn warn(&self, text: String) -> String {
        if self.color { text.yellow().to_string() } else { text }
    }

    fn bad(&self, text: String) -> String {
        if self.color { text.red().to_string() } else { text }
    }
}

fn local<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    at.with_timezone(&now.timezone())
        .naive_local()
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn plural(n: u32, unit: &str) -> String {
    format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" })
}

fn entry_type(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Lecture => "Lecture",
        EntryType::Lab => "Lab",
        EntryType::Tutorial => "Tutorial",
        EntryType::Seminar => "Seminar",
        EntryType::Other => "Class",
    }
}

fn class_line(entry: &TimetableEntry) -> String {
    let day = entry.day_of_week.as_deref().unwrap_or_default();
    let start = entry.start_time.as_deref().unwrap_or_default();
    let times = match entry.end_time.as_deref() {
        Some(end) if !end.is_empty() => format!("{}-{}", start, end),
        _ => start.to_string(),
    };
    let place = match entry.room.as_deref() {
        Some(room) if !room.trim().is_empty() => format!("{}, {}", entry_type(entry.entry_type), room),
        _ => entry_type(entry.entry_type).to_string(),
    };
    format!("{} {} {} ({})", day, times, entry.subject, place)
}

fn task_line<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> String {
    let Some(due) = task.due_date else {
        return task.title.clone();
    };
    let priority = task
        .priority
        .map(|p| format!(" [{}]", p.as_str()))
        .unwrap_or_default();
    format!(
        "{} {}{} - {} ({})",
        local(&due, now),
        task.title,
        priority,
        task.subject_or_default(),
        format_time_until(&due, now)
    )
}

/// Text report for one snapshot. Times are shown in `now`'s zone.
pub struct Report<'a, Tz: TimeZone> {
    snapshot: &'a DashboardSnapshot,
    now: &'a DateTime<Tz>,
    config: &'a AggregationConfig,
    painter: Painter,
}

impl<'a, Tz: TimeZone> Report<'a, Tz> {
    pub fn new(
        snapshot: &'a DashboardSnapshot,
        now: &'a DateTime<Tz>,
        config: &'a AggregationConfig,
        color: bool,
    ) -> Self {
        Self {
            snapshot,
            now,
            config,
            painter: Painter { color },
        }
    }

    fn write_tasks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s, p) = (self.snapshot, &self.painter);
        writeln!(f, "{}", p.heading("Tasks"))?;
        writeln!(f, "  Total: {}", s.total_tasks)?;
        writeln!(
            f,
            "  Completed: {}",
            p.good(format!("{} ({}%)", s.completed_tasks, s.completion_pct))
        )?;
        writeln!(f, "  Pending: {}", s.pending_tasks)?;
        let overdue = s.overdue_tasks.to_string();
        let overdue = if s.overdue_tasks > 0 { p.bad(overdue) } else { overdue };
        writeln!(f, "  Overdue: {}", overdue)?;
        writeln!(
            f,
            "  Due soon: {} (next {})",
            p.warn(s.due_soon_tasks.to_string()),
            plural(self.config.due_soon_days, "day")
        )?;
        writeln!(f, "  Upcoming deadlines: {}", s.upcoming_deadlines)
    }

    fn write_study(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.snapshot;
        writeln!(f, "{}", self.painter.heading("Study"))?;
        writeln!(
            f,
            "  Hours (last {}): {}",
            plural(self.config.study_window_days, "day"),
            s.study_hours
        )?;
        writeln!(f, "  Current streak: {}", plural(s.current_streak, "day"))?;

        writeln!(f)?;
        writeln!(f, "{}", self.painter.heading("Top subjects"))?;
        if s.subjects.is_empty() {
            writeln!(f, "  None")?;
        }
        for subject in &s.subjects {
            writeln!(
                f,
                "  {}: {}/{} ({}%)",
                subject.subject, subject.completed_count, subject.total_count, subject.completion_pct
            )?;
        }
        Ok(())
    }

    fn write_upcoming(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s, p, now) = (self.snapshot, &self.painter, self.now);
        writeln!(f, "{}", p.heading("Next class"))?;
        match &s.next_class {
            Some(entry) => writeln!(f, "  {}", class_line(entry))?,
            None => writeln!(f, "  No class today or tomorrow")?,
        }

        writeln!(f)?;
        writeln!(f, "{}", p.heading("Upcoming tasks"))?;
        if s.upcoming_tasks.is_empty() {
            writeln!(f, "  None")?;
        }
        for task in &s.upcoming_tasks {
            writeln!(f, "  {}", task_line(task, now))?;
        }

        writeln!(f)?;
        writeln!(f, "{}", p.heading("Upcoming reminders"))?;
        if s.upcoming_reminders.is_empty() {
            writeln!(f, "  None")?;
        }
        for reminder in &s.upcoming_reminders {
            if let Some(at) = reminder.reminder_date {
                writeln!(
                    f,
                    "  {} {} ({})",
                    local(&at, now),
                    reminder.title,
                    format_countdown(&at, now)
                )?;
            }
        }
        if let Some(next) = &s.next_reminder {
            writeln!(f, "  {}", p.warn(next.message()))?;
        }
        Ok(())
    }

    fn write_activity(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.painter.heading("Recent activity"))?;
        if self.snapshot.recent_activity.is_empty() {
            writeln!(f, "  None")?;
        }
        for activity in &self.snapshot.recent_activity {
            writeln!(f, "  - {}", activity.action)?;
        }
        Ok(())
    }
}

impl<Tz: TimeZone> fmt::Display for Report<'_, Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard")?;
        writeln!(f, "=========")?;
        writeln!(
            f,
            "As of {} ({})",
            self.now.naive_local().format("%Y-%m-%d %H:%M"),
            weekday_of(self.now)
        )?;
        writeln!(f)?;
        self.write_tasks(f)?;
        writeln!(f)?;
        self.write_study(f)?;
        writeln!(f)?;
        self.write_upcoming(f)?;
        writeln!(f)?;
        self.write_activity(f)
    }
}

/// Render a snapshot as a text report
pub fn render<Tz: TimeZone>(
    snapshot: &DashboardSnapshot,
    now: &DateTime<Tz>,
    config: &AggregationConfig,
    color: bool,
) -> String {
    Report::new(snapshot, now, config, color).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{SnapshotInput, aggregate};
    use crate::model::{Priority, Reminder, StudySession, WeekTimetable};
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<FixedOffset> {
        // Wednesday, 10:00 local
        DateTime::parse_from_rfc3339("2025-03-05T10:00:00+01:00").unwrap()
    }

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
    }

    fn sample_input() -> SnapshotInput {
        let mut timetable = WeekTimetable::new();
        timetable.insert(
            "Wednesday".to_string(),
            vec![TimetableEntry {
                start_time: Some("14:00".to_string()),
                end_time: Some("15:00".to_string()),
                subject: "Physics".to_string(),
                room: Some("B12".to_string()),
                entry_type: EntryType::Lab,
                ..Default::default()
            }],
        );

        SnapshotInput {
            tasks: vec![
                Task {
                    title: "Problem set".to_string(),
                    subject: Some("Math".to_string()),
                    is_completed: true,
                    updated_at: Some(utc("2025-03-04T18:00:00Z")),
                    ..Default::default()
                },
                Task {
                    title: "Lab report".to_string(),
                    subject: Some("Physics".to_string()),
                    due_date: Some(utc("2025-03-06T16:00:00Z")),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
                Task {
                    title: "Reading".to_string(),
                    subject: Some("Physics".to_string()),
                    due_date: Some(utc("2025-03-01T12:00:00Z")),
                    ..Default::default()
                },
            ],
            sessions: vec![StudySession {
                subject: Some("Math".to_string()),
                start_time: Some(utc("2025-03-05T07:00:00Z")),
                end_time: Some(utc("2025-03-05T08:30:00Z")),
                ..Default::default()
            }],
            reminders: vec![Reminder {
                title: "Quiz".to_string(),
                reminder_date: Some(utc("2025-03-05T09:00:00Z") + Duration::hours(26) + Duration::minutes(5)),
                ..Default::default()
            }],
            timetable,
        }
    }

    #[test]
    fn test_render_plain_report() {
        let config = AggregationConfig::default();
        let snapshot = aggregate(&sample_input(), &now(), &config);
        let report = render(&snapshot, &now(), &config, false);
        insta::assert_snapshot!(report, @r"
        Dashboard
        =========
        As of 2025-03-05 10:00 (Wednesday)

        Tasks
        -----
          Total: 3
          Completed: 1 (33%)
          Pending: 2
          Overdue: 1
          Due soon: 1 (next 7 days)
          Upcoming deadlines: 2

        Study
        -----
          Hours (last 30 days): 2
          Current streak: 1 day

        Top subjects
        ------------
          Math: 1/1 (100%)
          Physics: 0/2 (0%)

        Next class
        ----------
          Wednesday 14:00-15:00 Physics (Lab, B12)

        Upcoming tasks
        --------------
          2025-03-06 17:00 Lab report [High] - Physics (tomorrow)

        Upcoming reminders
        ------------------
          2025-03-06 12:05 Quiz (26h 5m left)
          Upcoming: Quiz in 26h 5m

        Recent activity
        ---------------
          - Updated Lab report
          - Completed Problem set
          - Updated Reading
          - Study session - Math
          - Reminder: Quiz
        ");
    }

    #[test]
    fn test_render_empty_snapshot() {
        let config = AggregationConfig::default();
        let snapshot = aggregate(&SnapshotInput::default(), &now(), &config);
        let report = render(&snapshot, &now(), &config, false);
        assert!(report.contains("  Total: 0"));
        assert!(report.contains("  Current streak: 0 days"));
        assert!(report.contains("  No class today or tomorrow"));
        assert_eq!(report.matches("  None").count(), 4);
    }

    #[test]
    fn test_report_sections_in_order() {
        let config = AggregationConfig::default();
        let snapshot = aggregate(&sample_input(), &now(), &config);
        let report = Report::new(&snapshot, &now(), &config, false).to_string();
        let headings: Vec<&str> = report
            .lines()
            .zip(report.lines().skip(1))
            .filter(|(_, next)| !next.is_empty() && next.chars().all(|c| c == '-'))
            .map(|(heading, _)| heading)
            .collect();
        assert_eq!(
            headings,
            vec![
                "Tasks",
                "Study",
                "Top subjects",
                "Next class",
                "Upcoming tasks",
                "Upcoming reminders",
                "Recent activity"
            ]
        );
        assert!(report.ends_with("  - Reminder: Quiz\n"));
    }

    #[test]
    fn test_class_line_without_room_or_end() {
        let entry = TimetableEntry {
            day_of_week: Some("Friday".to_string()),
            start_time: Some("09:00".to_string()),
            subject: "Seminar prep".to_string(),
            entry_type: EntryType::Seminar,
            ..Default::default()
        };
        assert_eq!(class_line(&entry), "Friday 09:00 Seminar prep (Seminar)");
    }
}
