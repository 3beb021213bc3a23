//! Task data structures and derived aggregate types.
//!
//! This module defines the `Task` struct stored in the planner, the partial
//! update applied to it, the free-text monthly review, and the aggregate
//! shapes computed from a month's tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::fields::*;

/// A planned unit of work placed on a day of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// ISO date recorded at creation. Not kept in sync with `day`/`month`.
    #[serde(default)]
    pub date: String,
    /// Not checked against the month length, and may be zero or negative.
    #[serde(deserialize_with = "day_or_default")]
    pub day: i32,
    pub month: u32,
}

impl Task {
    /// Create a task with a fresh id and default status and priority.
    pub fn new(title: impl Into<String>, month: u32, day: i32, created: NaiveDate) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            status: TaskStatus::NotStarted,
            priority: TaskPriority::Medium,
            date: created.format("%Y-%m-%d").to_string(),
            day,
            month,
        }
    }

    /// Apply every field present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(day) = update.day {
            self.day = day;
        }
        if let Some(month) = update.month {
            self.month = month;
        }
    }

    /// Title for display, with a placeholder for untitled tasks.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled Task"
        } else {
            &self.title
        }
    }
}

// A day stored as null (a NaN written by an earlier client) reads back as 1.
fn day_or_default<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(1))
}

/// Partial update of a task. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub day: Option<i32>,
    pub month: Option<u32>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TaskUpdate::default()
    }
}

/// Free-text reflection attached to one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReview {
    #[serde(default)]
    pub achievements: String,
    #[serde(default)]
    pub next_plan: String,
}

impl MonthlyReview {
    pub fn field(&self, field: ReviewField) -> &str {
        match field {
            ReviewField::Achievements => &self.achievements,
            ReviewField::NextPlan => &self.next_plan,
        }
    }

    pub fn set_field(&mut self, field: ReviewField, value: String) {
        match field {
            ReviewField::Achievements => self.achievements = value,
            ReviewField::NextPlan => self.next_plan = value,
        }
    }
}

/// Completion statistics for a month's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
    /// Completed share of `total`, as a whole percentage.
    pub rate: u32,
}

/// The tasks placed on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan<'a> {
    pub day: u32,
    pub tasks: Vec<&'a Task>,
    pub planned_count: usize,
    pub completed_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn new_task_has_defaults() {
        let task = Task::new("", 0, 15, created());
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.date, "2026-01-15");
        assert!(!task.id.is_empty());
        assert_eq!(task.display_title(), "Untitled Task");
    }

    #[test]
    fn new_tasks_get_distinct_ids() {
        let a = Task::new("a", 0, 1, created());
        let b = Task::new("a", 0, 1, created());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut task = Task::new("Write report", 0, 15, created());
        let id = task.id.clone();
        task.apply(&TaskUpdate {
            status: Some(TaskStatus::Completed),
            day: Some(31),
            ..TaskUpdate::default()
        });
        assert_eq!(task.id, id);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.day, 31);
        assert_eq!(task.month, 0);
    }

    #[test]
    fn task_json_uses_stored_field_names() {
        let json = r#"{"id":"t1","title":"A","status":"completed","priority":"Low","date":"2026-03-02","day":2,"month":2}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.priority, TaskPriority::Low);
        assert_eq!(task.month, 2);
    }

    #[test]
    fn null_day_reads_as_first_of_month() {
        let json = r#"{"id":"t1","title":"A","status":"completed","priority":"Low","date":"2026-03-02","day":null,"month":2}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.day, 1);
    }

    #[test]
    fn out_of_range_days_read_back_unchanged() {
        let json = r#"{"id":"t1","title":"A","status":"completed","priority":"Low","date":"2026-03-02","day":-1,"month":2}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.day, -1);
        let back = serde_json::to_string(&task).unwrap();
        assert!(back.contains(r#""day":-1"#));
    }

    #[test]
    fn review_uses_camel_case_keys() {
        let review = MonthlyReview {
            achievements: "shipped".into(),
            next_plan: "rest".into(),
        };
        let json = serde_json::to_string(&review).unwrap();
        assert_eq!(json, r#"{"achievements":"shipped","nextPlan":"rest"}"#);
    }
}
