pub mod activity;
pub mod dashboard;
pub mod reminders;
pub mod sessions;
pub mod streak;
pub mod subjects;
pub mod tasks;
pub mod timetable;

pub use dashboard::{DashboardSnapshot, SnapshotInput, aggregate, subject_performance};
pub use subjects::{SubjectPerformance, by_subject};
pub use tasks::{TaskClassification, TaskStatus, classify};
pub use timetable::next_class;
