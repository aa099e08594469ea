use crate::model::Task;
use serde::Serialize;

use super::tasks::{completion_percentage, is_completed};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectPerformance {
    pub subject: String,
    pub total_count: usize,
    pub completed_count: usize,
    pub completion_pct: u8,
}

/// Group tasks by subject and rank the groups by completion percentage,
/// highest first. Groups with equal percentages keep the order in which
/// their subject was first seen.
pub fn by_subject(tasks: &[Task]) -> Vec<SubjectPerformance> {
    let mut groups: Vec<SubjectPerformance> = Vec::new();
    for task in tasks {
        let subject = task.subject_or_default();
        let index = match groups.iter().position(|g| g.subject == subject) {
            Some(index) => index,
            None => {
                groups.push(SubjectPerformance {
                    subject: subject.to_string(),
                    total_count: 0,
                    completed_count: 0,
                    completion_pct: 0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.total_count += 1;
        if is_completed(task) {
            group.completed_count += 1;
        }
    }

    for group in &mut groups {
        group.completion_pct = completion_percentage(group.completed_count, group.total_count);
    }
    groups.sort_by(|a, b| b.completion_pct.cmp(&a.completion_pct));
    groups
}

/// The `limit` best-performing subjects
pub fn top_subjects(tasks: &[Task], limit: usize) -> Vec<SubjectPerformance> {
    let mut ranked = by_subject(tasks);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(subject: Option<&str>, done: bool) -> Task {
        Task {
            subject: subject.map(str::to_string),
            is_completed: done,
            ..Default::default()
        }
    }

    fn ten_tasks() -> Vec<Task> {
        let mut tasks = Vec::new();
        for i in 0..5 {
            tasks.push(task(Some("Physics"), i == 0));
        }
        for i in 0..5 {
            tasks.push(task(Some("Math"), i < 3));
        }
        tasks
    }

    #[test]
    fn test_math_ranks_above_physics() {
        let tasks = ten_tasks();
        let ranked = by_subject(&tasks);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].subject, "Math");
        assert_eq!(ranked[1].subject, "Physics");

        for group in &ranked {
            let expected = (group.completed_count as f64 / group.total_count as f64 * 100.0).round();
            assert_eq!(group.completion_pct as f64, expected);
            assert_eq!(group.total_count, 5);
        }
        assert_eq!(ranked[0].completed_count, 3);
        assert_eq!(ranked[1].completed_count, 1);
        assert!(ranked[0].completion_pct > ranked[1].completion_pct);
    }

    #[test]
    fn test_missing_or_blank_subject_is_general() {
        let tasks = vec![task(None, true), task(Some(""), false), task(Some("Art"), false)];
        let ranked = by_subject(&tasks);
        assert_eq!(ranked[0].subject, "General");
        assert_eq!(ranked[0].total_count, 2);
        assert_eq!(ranked[0].completion_pct, 50);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let tasks = vec![
            task(Some("Chemistry"), false),
            task(Some("Biology"), false),
            task(Some("History"), true),
            task(Some("Art"), false),
        ];
        let subjects: Vec<String> = by_subject(&tasks).into_iter().map(|g| g.subject).collect();
        assert_eq!(subjects, vec!["History", "Chemistry", "Biology", "Art"]);
    }

    #[test]
    fn test_percentages_stay_in_range() {
        let tasks = vec![task(Some("A"), true), task(Some("B"), false), task(Some("C"), true), task(Some("C"), false)];
        for group in by_subject(&tasks) {
            assert!(group.completion_pct <= 100);
        }
        assert!(by_subject(&[]).is_empty());
    }

    #[test]
    fn test_top_subjects_keeps_four() {
        let tasks: Vec<Task> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|s| task(Some(*s), false))
            .collect();
        let top = top_subjects(&tasks, 4);
        assert_eq!(top.len(), 4);
        assert_eq!(top[0].subject, "A");
        assert_eq!(by_subject(&tasks).len(), 6);
    }
}
