//! The planner session: owned state plus the operations that mutate it.
//!
//! A `Session` is the only way to change planner data. It can only be built
//! by loading from a store, so nothing is ever saved over data that has not
//! been read yet. Every mutation writes the full collection back before
//! returning.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::db::{Database, KeyValueStore};
use crate::error::{PlanError, Result};
use crate::export::{export_to, DownloadSink, ExportName};
use crate::fields::*;
use crate::plan;
use crate::task::{DayPlan, MonthlyReview, MonthlyStats, Task, TaskUpdate};

pub struct Session<S: KeyValueStore> {
    store: S,
    db: Database,
    year: i32,
    month: u32,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the store and select `month` of `year`.
    pub fn open(store: S, year: i32, month: u32) -> Result<Self> {
        check_month(month)?;
        let db = Database::load(&store)?;
        Ok(Session { store, db, year, month })
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn tasks(&self) -> &[Task] {
        &self.db.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Selected month index.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn set_month(&mut self, month: u32) -> Result<()> {
        check_month(month)?;
        self.month = month;
        Ok(())
    }

    pub fn next_month(&mut self) {
        self.month = plan::next_month(self.month);
    }

    pub fn prev_month(&mut self) {
        self.month = plan::prev_month(self.month);
    }

    fn save(&mut self) -> Result<()> {
        self.db.save(&mut self.store)
    }

    /// Create a task in the selected month and put it first in the collection.
    ///
    /// `day` defaults to today's day of month.
    pub fn add_task(&mut self, title: &str, day: Option<i32>, today: NaiveDate) -> Result<&Task> {
        let day = day.unwrap_or_else(|| today.day() as i32);
        let task = Task::new(title, self.month, day, today);
        debug!(id = %task.id, month = self.month, day, "adding task");
        self.db.tasks.insert(0, task);
        self.save()?;
        Ok(&self.db.tasks[0])
    }

    /// Apply a partial update to the task with `id`.
    pub fn update_task(&mut self, id: &str, update: &TaskUpdate) -> Result<&Task> {
        if let Some(month) = update.month {
            check_month(month)?;
        }
        let task = self
            .db
            .get_mut(id)
            .ok_or_else(|| PlanError::TaskNotFound(id.to_string()))?;
        task.apply(update);
        debug!(id, ?update, "updated task");
        self.save()?;
        self.db
            .get(id)
            .ok_or_else(|| PlanError::TaskNotFound(id.to_string()))
    }

    /// Remove the task with `id`.
    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let removed = self
            .db
            .remove(id)
            .ok_or_else(|| PlanError::TaskNotFound(id.to_string()))?;
        debug!(id, "deleted task");
        self.save()?;
        Ok(removed)
    }

    /// Review for the selected month, if one was ever written.
    pub fn review(&self) -> Option<&MonthlyReview> {
        self.db.reviews.get(&self.month)
    }

    /// Set one review field for the selected month, creating the review if needed.
    pub fn update_review(&mut self, field: ReviewField, value: impl Into<String>) -> Result<()> {
        self.db
            .reviews
            .entry(self.month)
            .or_default()
            .set_field(field, value.into());
        self.save()
    }

    /// Tasks of the selected month, ordered by day.
    pub fn month_tasks(&self) -> Vec<&Task> {
        plan::filter_and_sort_by_month(&self.db.tasks, self.month)
    }

    pub fn pending_tasks(&self) -> Vec<&Task> {
        plan::pending_tasks(&self.month_tasks())
    }

    pub fn stats(&self) -> MonthlyStats {
        plan::compute_stats(&self.month_tasks())
    }

    pub fn days_in_month(&self) -> u32 {
        plan::days_in_month(self.year, self.month)
    }

    pub fn calendar(&self) -> Vec<Option<u32>> {
        plan::calendar_layout(self.year, self.month)
    }

    pub fn day_plans(&self) -> Vec<DayPlan<'_>> {
        plan::day_plans(&self.month_tasks(), self.year, self.month)
    }

    /// Export the whole collection through `sink`.
    pub fn export(
        &self,
        sink: &mut impl DownloadSink,
        annual: bool,
        quoting: CsvQuoting,
    ) -> Result<std::path::PathBuf> {
        let name = if annual {
            ExportName::Annual
        } else {
            ExportName::Monthly { month: self.month }
        };
        export_to(sink, &self.db.tasks, name, self.year, quoting)
    }
}

fn check_month(month: u32) -> Result<()> {
    if month < 12 {
        Ok(())
    } else {
        Err(PlanError::InvalidMonth(month.to_string()))
    }
}
