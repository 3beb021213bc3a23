//! Persistence and utility functions for the planner.
//!
//! This module provides the `KeyValueStore` capability the planner persists
//! through, a file-backed implementation of it, and the `Database` struct
//! holding the task list and monthly reviews. It also hosts the small
//! parsing and formatting helpers shared by the CLI and the TUI.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{PlanError, Result};
use crate::fields::*;
use crate::task::{MonthlyReview, Task};

/// Store key holding the JSON array of tasks.
pub const TASKS_KEY: &str = "annual_plan_tasks";
/// Store key holding the JSON object of monthly reviews.
pub const REVIEWS_KEY: &str = "annual_plan_reviews";

const MIN_ID_PREFIX: usize = 4;

/// Durable string key-value storage.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &path)?;
        Ok(())
    }
}

/// Store kept entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// In-memory copy of everything the planner persists.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Database {
    /// Newest first.
    pub tasks: Vec<Task>,
    /// Month index to review. Absent months have no entry.
    pub reviews: BTreeMap<u32, MonthlyReview>,
}

impl Database {
    /// Load both keys from the store. A missing or unreadable value loads as empty.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        let tasks = load_tasks(store)?;
        let reviews: BTreeMap<u32, MonthlyReview> = load_key(store, REVIEWS_KEY)?;
        debug!(tasks = tasks.len(), reviews = reviews.len(), "loaded planner data");
        Ok(Database { tasks, reviews })
    }

    /// Overwrite both keys with the full current contents.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set(TASKS_KEY, &serde_json::to_string(&self.tasks)?)?;
        store.set(REVIEWS_KEY, &serde_json::to_string(&self.reviews)?)?;
        debug!(tasks = self.tasks.len(), reviews = self.reviews.len(), "saved planner data");
        Ok(())
    }

    /// Get a task by ID.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove the task with `id`, keeping the others in order.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }
}

/// Tasks are decoded one by one so a single bad record does not take the
/// rest of the list with it.
fn load_tasks(store: &impl KeyValueStore) -> Result<Vec<Task>> {
    let records: Vec<serde_json::Value> = load_key(store, TASKS_KEY)?;
    let mut tasks = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Task>(record) {
            Ok(task) => tasks.push(task),
            Err(e) => warn!(index, error = %e, "discarding malformed stored task"),
        }
    }
    Ok(tasks)
}

fn load_key<T>(store: &impl KeyValueStore, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(text) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&text) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed stored value");
            Ok(T::default())
        }
    }
}

/// Parse a month given as a name, a three letter abbreviation or 1-12.
/// Returns the month index (January = 0).
pub fn parse_month_input(s: &str) -> Result<u32> {
    let s = s.trim().to_lowercase();
    if let Ok(n) = s.parse::<u32>() {
        return if (1..=12).contains(&n) {
            Ok(n - 1)
        } else {
            Err(PlanError::InvalidMonth(s))
        };
    }
    MONTHS
        .iter()
        .position(|name| {
            let name = name.to_lowercase();
            name == s || (s.len() >= 3 && name.starts_with(&s))
        })
        .map(|idx| idx as u32)
        .ok_or(PlanError::InvalidMonth(s))
}

/// Parse a day of month. Anything that is not a positive number becomes 1.
pub fn parse_day_input(s: &str) -> i32 {
    match s.trim().parse::<i32>() {
        Ok(day) if day > 0 => day,
        _ => 1,
    }
}

/// Full month name for an index, "-" when out of range.
pub fn month_name(month: u32) -> &'static str {
    MONTHS.get(month as usize).copied().unwrap_or("-")
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Short form of a task id for tables.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<9} {:<4} {:<12} {:<7} {}",
        "ID", "Day", "Status", "Pri", "Title"
    );
    for t in tasks {
        println!(
            "{:<9} {:<4} {:<12} {:<7} {}",
            short_id(&t.id),
            t.day,
            t.status.label(),
            t.priority.as_str(),
            t.display_title()
        );
    }
}

/// Resolve a task identifier to a task ID.
///
/// Tries an exact id, then a case-insensitive title, then a unique id prefix.
pub fn resolve_task_identifier(identifier: &str, db: &Database) -> Result<String> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(PlanError::TaskNotFound(String::new()));
    }
    if let Some(task) = db.get(identifier) {
        return Ok(task.id.clone());
    }

    let lowered = identifier.to_lowercase();
    let by_title: Vec<&Task> = db
        .tasks
        .iter()
        .filter(|t| t.title.to_lowercase() == lowered)
        .collect();
    match by_title.len() {
        0 => {}
        1 => return Ok(by_title[0].id.clone()),
        count => {
            return Err(PlanError::AmbiguousTask {
                identifier: identifier.to_string(),
                count,
            })
        }
    }

    if identifier.len() < MIN_ID_PREFIX {
        return Err(PlanError::TaskNotFound(identifier.to_string()));
    }
    let by_prefix: Vec<&Task> = db.tasks.iter().filter(|t| t.id.starts_with(identifier)).collect();
    match by_prefix.len() {
        0 => Err(PlanError::TaskNotFound(identifier.to_string())),
        1 => Ok(by_prefix[0].id.clone()),
        count => Err(PlanError::AmbiguousTask {
            identifier: identifier.to_string(),
            count,
        }),
    }
}
