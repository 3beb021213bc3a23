//! CSV export of the task collection.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::db::month_name;
use crate::error::{PlanError, Result};
use crate::fields::CsvQuoting;
use crate::task::Task;

pub const CSV_HEADER: &str = "Month,Day,Task,Priority,Status";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Which file name an export is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportName {
    /// `{year}_Plan_{MonthName}.csv` for the selected month.
    Monthly { month: u32 },
    /// `{year}_Work_Plan.csv`.
    Annual,
}

impl ExportName {
    pub fn filename(self, year: i32) -> String {
        match self {
            ExportName::Monthly { month } => format!("{year}_Plan_{}.csv", month_name(month)),
            ExportName::Annual => format!("{year}_Work_Plan.csv"),
        }
    }
}

/// A finished export, ready to hand to a download sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content: String,
    pub mime_type: &'static str,
}

/// Somewhere an export file can be delivered to.
pub trait DownloadSink {
    /// Deliver the file and return where it ended up.
    fn deliver(&mut self, file: &ExportFile) -> Result<PathBuf>;
}

/// Writes export files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, file: &ExportFile) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&file.filename);
        fs::write(&path, &file.content)?;
        info!(path = %path.display(), bytes = file.content.len(), "wrote export");
        Ok(path)
    }
}

/// Render every task as CSV, one line per task in collection order.
///
/// Refuses an empty collection instead of producing a header-only file.
pub fn to_csv(tasks: &[Task], quoting: CsvQuoting) -> Result<String> {
    if tasks.is_empty() {
        return Err(PlanError::NothingToExport);
    }
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for t in tasks {
        lines.push(format!(
            "{},{},{},{},{}",
            month_name(t.month),
            t.day,
            quote_title(&t.title, quoting),
            t.priority.as_str(),
            t.status.as_str()
        ));
    }
    Ok(lines.join("\n"))
}

fn quote_title(title: &str, quoting: CsvQuoting) -> String {
    match quoting {
        CsvQuoting::Raw => format!("\"{title}\""),
        CsvQuoting::Rfc4180 => format!("\"{}\"", title.replace('"', "\"\"")),
    }
}

/// Build the export file for `tasks`.
pub fn build_export(
    tasks: &[Task],
    name: ExportName,
    year: i32,
    quoting: CsvQuoting,
) -> Result<ExportFile> {
    Ok(ExportFile {
        filename: name.filename(year),
        content: to_csv(tasks, quoting)?,
        mime_type: CSV_MIME_TYPE,
    })
}

/// Build the export and deliver it to `sink`.
pub fn export_to(
    sink: &mut impl DownloadSink,
    tasks: &[Task],
    name: ExportName,
    year: i32,
    quoting: CsvQuoting,
) -> Result<PathBuf> {
    let file = build_export(tasks, name, year, quoting)?;
    sink.deliver(&file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{TaskPriority, TaskStatus};
    use chrono::NaiveDate;

    fn task(title: &str, month: u32, day: i32) -> Task {
        Task::new(title, month, day, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
    }

    #[test]
    fn empty_collection_is_refused() {
        assert!(matches!(to_csv(&[], CsvQuoting::Raw), Err(PlanError::NothingToExport)));
    }

    #[test]
    fn single_task_exports_header_and_one_line() {
        let mut t = task("A", 0, 1);
        t.priority = TaskPriority::High;
        let csv = to_csv(&[t], CsvQuoting::Raw).unwrap();
        assert_eq!(csv, "Month,Day,Task,Priority,Status\nJanuary,1,\"A\",High,not-started");
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn lines_follow_collection_order() {
        let mut done = task("done", 11, 24);
        done.status = TaskStatus::Completed;
        let csv = to_csv(&[done, task("first", 0, 2)], CsvQuoting::Raw).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "December,24,\"done\",Medium,completed");
        assert_eq!(lines[2], "January,2,\"first\",Medium,not-started");
    }

    #[test]
    fn raw_quoting_leaves_embedded_quotes() {
        let t = task("say \"hi\", then", 0, 1);
        let raw = to_csv(std::slice::from_ref(&t), CsvQuoting::Raw).unwrap();
        assert!(raw.ends_with("\"say \"hi\", then\",Medium,not-started"));

        let escaped = to_csv(&[t], CsvQuoting::Rfc4180).unwrap();
        assert!(escaped.ends_with("\"say \"\"hi\"\", then\",Medium,not-started"));
    }

    #[test]
    fn filenames_follow_variant() {
        assert_eq!(ExportName::Monthly { month: 2 }.filename(2026), "2026_Plan_March.csv");
        assert_eq!(ExportName::Annual.filename(2026), "2026_Work_Plan.csv");
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let tasks = [task("A", 0, 1)];
        let path = export_to(&mut sink, &tasks, ExportName::Annual, 2026, CsvQuoting::Raw).unwrap();

        assert_eq!(path, dir.path().join("2026_Work_Plan.csv"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
    }

    #[test]
    fn export_file_carries_csv_mime_type() {
        let tasks = [task("A", 0, 1)];
        let file = build_export(&tasks, ExportName::Annual, 2026, CsvQuoting::Raw).unwrap();
        assert_eq!(file.mime_type, "text/csv");
    }
}
