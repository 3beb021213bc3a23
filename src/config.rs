//! Runtime configuration resolved from flags and the environment.

use std::path::PathBuf;

use chrono::{Datelike, Local};

use crate::db::FileStore;

/// Name of the data directory created under `$HOME`.
pub const DATA_DIR_NAME: &str = ".annual_plan";

/// Where the planner keeps its data and which year it plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    pub data_dir: PathBuf,
    pub year: i32,
}

impl PlanConfig {
    /// Resolve the configuration. An explicit directory wins over `$HOME/.annual_plan`.
    pub fn resolve(dir: Option<PathBuf>, year: i32) -> Self {
        let data_dir = dir.unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(DATA_DIR_NAME)
        });
        PlanConfig { data_dir, year }
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

/// The wall-clock month as an index (January = 0).
pub fn current_month() -> u32 {
    Local::now().month0()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = PlanConfig::resolve(Some(PathBuf::from("/tmp/plan")), 2026);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/plan"));
        assert_eq!(config.store().path_for("k"), PathBuf::from("/tmp/plan/k.json"));
    }

    #[test]
    fn default_dir_lives_under_home() {
        let config = PlanConfig::resolve(None, 2030);
        assert!(config.data_dir.ends_with(DATA_DIR_NAME));
        assert_eq!(config.year, 2030);
    }

    #[test]
    fn current_month_is_an_index() {
        assert!(current_month() < 12);
    }
}
