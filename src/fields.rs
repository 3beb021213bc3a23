//! Enumerations and fixed tables for the planner.
//!
//! This module defines the status and priority values a task can take,
//! the sorting and export options exposed on the command line, and the
//! month and weekday name tables used by every view.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Full month names indexed by month (January = 0).
pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Column headers for a Monday-first calendar grid.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Planning year used when none is configured.
pub const DEFAULT_YEAR: i32 = 2026;

/// Task progress status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// The stored value, also used in CSV export.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not-started",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Human label ("in progress").
    pub fn label(self) -> String {
        self.as_str().replace('-', " ")
    }

    /// Next status in display order, wrapping around.
    pub fn cycle(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// The stored value, also used in CSV export.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::High => "High",
            TaskPriority::Medium => "Medium",
            TaskPriority::Low => "Low",
        }
    }

    /// Ordering weight, highest priority first.
    pub fn rank(self) -> u8 {
        match self {
            TaskPriority::High => 0,
            TaskPriority::Medium => 1,
            TaskPriority::Low => 2,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            TaskPriority::High => TaskPriority::Medium,
            TaskPriority::Medium => TaskPriority::Low,
            TaskPriority::Low => TaskPriority::High,
        }
    }
}

/// Available sorting keys for task lists.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortKey {
    Day,
    Month,
    Title,
    Status,
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The two free-text fields of a monthly review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewField {
    Achievements,
    NextPlan,
}

impl ReviewField {
    pub fn label(self) -> &'static str {
        match self {
            ReviewField::Achievements => "Achievements",
            ReviewField::NextPlan => "Next Month Plan",
        }
    }
}

/// How task titles are quoted in CSV export.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum CsvQuoting {
    /// Wrap in double quotes with no escaping.
    #[default]
    Raw,
    /// Wrap in double quotes and double any embedded quote.
    Rfc4180,
}
