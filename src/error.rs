//! Error type shared by the persistence, session and export layers.

use thiserror::Error;

/// Errors raised by planner operations.
///
/// Only real failures live here. Recoverable input problems (a non-numeric
/// day, malformed stored JSON) are absorbed where they occur.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Reading or writing the durable store failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded for the store.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// No task matches the given identifier.
    #[error("no task matches '{0}'")]
    TaskNotFound(String),

    /// More than one task matches the given identifier.
    #[error("'{identifier}' matches {count} tasks, use a longer id prefix")]
    AmbiguousTask { identifier: String, count: usize },

    /// A month could not be parsed or is outside 0..=11.
    #[error("invalid month '{0}' (expected a name, an abbreviation or 1-12)")]
    InvalidMonth(String),

    /// Export was requested with an empty task collection.
    #[error("No tasks to export yet!")]
    NothingToExport,
}

pub type Result<T> = std::result::Result<T, PlanError>;
