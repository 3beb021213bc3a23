//! Command implementations for the CLI interface.
//!
//! Each subcommand maps to one handler here. Handlers print their result,
//! and on a real failure print the error to stderr and exit with status 1.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config::PlanConfig;
use crate::db::*;
use crate::error::{PlanError, Result};
use crate::export::DirectorySink;
use crate::fields::*;
use crate::plan::sort_tasks;
use crate::session::Session;
use crate::task::{DayPlan, TaskUpdate};
use crate::tui::run::run_tui;

pub type FileSession = Session<FileStore>;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui,

    /// Add a task to the selected month.
    Add {
        /// Task description. May be left empty and filled in later.
        #[arg(default_value = "")]
        title: String,
        /// Day of month. Defaults to today's day; anything but a positive number becomes 1.
        #[arg(long, allow_hyphen_values = true)]
        day: Option<String>,
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        #[arg(long, value_enum)]
        priority: Option<TaskPriority>,
    },

    /// List the tasks of the selected month, ordered by day.
    List {
        /// Only tasks that are not completed.
        #[arg(long)]
        pending: bool,
        /// Every month, not just the selected one.
        #[arg(long)]
        all: bool,
        /// Sort key. Defaults to day (month with --all).
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
        /// Sort descending.
        #[arg(long)]
        desc: bool,
    },

    /// Update fields on a task.
    Update {
        /// Task ID, ID prefix or title.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        #[arg(long, value_enum)]
        priority: Option<TaskPriority>,
        /// New day of month; anything but a positive number becomes 1.
        #[arg(long, allow_hyphen_values = true)]
        day: Option<String>,
        /// Move the task to another month.
        #[arg(long)]
        to_month: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Task ID, ID prefix or title.
        id: String,
    },

    /// Show completion statistics for the selected month.
    Stats,

    /// Show the selected month as a Monday-first calendar.
    Calendar,

    /// Show or edit the review notes of the selected month.
    Review {
        /// What went well this month.
        #[arg(long)]
        achievements: Option<String>,
        /// Top priorities for next month.
        #[arg(long)]
        next_plan: Option<String>,
    },

    /// Export every task to CSV.
    Export {
        /// Directory to write the file into.
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
        /// Name the file as the annual work plan instead of the selected month.
        #[arg(long)]
        annual: bool,
        /// Escape embedded quotes in titles.
        #[arg(long)]
        escape: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn or_exit<T>(result: Result<T>, context: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{context}: {e}");
            std::process::exit(1);
        }
    }
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &PlanConfig, month: u32) {
    if let Err(e) = run_tui(config, month) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the selected month.
pub fn cmd_add(
    session: &mut FileSession,
    title: String,
    day: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
) {
    let today = Local::now().date_naive();
    let day = day.as_deref().map(parse_day_input);
    let id = or_exit(session.add_task(&title, day, today), "Failed to add task")
        .id
        .clone();

    let update = TaskUpdate {
        status,
        priority,
        ..TaskUpdate::default()
    };
    if !update.is_empty() {
        or_exit(session.update_task(&id, &update), "Failed to save task");
    }
    println!("Added task {}", id);
}

/// List the tasks of the selected month, or of all months.
pub fn cmd_list(
    session: &FileSession,
    pending: bool,
    all: bool,
    sort: Option<SortKey>,
    desc: bool,
) {
    let mut tasks = if all {
        session.tasks().iter().collect()
    } else if pending {
        session.pending_tasks()
    } else {
        session.month_tasks()
    };
    if all && pending {
        tasks.retain(|t| t.status != TaskStatus::Completed);
    }

    let default_key = if all { SortKey::Month } else { SortKey::Day };
    let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
    // Month views are already ordered by day.
    if all || sort.is_some() || desc {
        sort_tasks(&mut tasks, sort.unwrap_or(default_key), direction);
    }

    let scope = if all {
        format!("{}", session.year())
    } else {
        format!("{} {}", month_name(session.month()), session.year())
    };
    if tasks.is_empty() {
        println!("No tasks planned for {scope}. Use `plan add` to start planning.");
        return;
    }
    println!("{scope}: {} task(s)", tasks.len());
    print_table(&tasks);
}

/// Update fields on a task.
pub fn cmd_update(
    session: &mut FileSession,
    id: String,
    title: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    day: Option<String>,
    to_month: Option<String>,
) {
    let task_id = or_exit(resolve_task_identifier(&id, session.db()), "Error resolving task");
    let month = to_month.as_deref().map(parse_month_input).transpose();
    let update = TaskUpdate {
        title,
        status,
        priority,
        day: day.as_deref().map(parse_day_input),
        month: or_exit(month, "Invalid month"),
    };
    if update.is_empty() {
        println!("Nothing to update.");
        return;
    }
    let task = or_exit(session.update_task(&task_id, &update), "Failed to update task");
    println!(
        "Updated {} ({} {}, {})",
        short_id(&task.id),
        month_name(task.month),
        task.day,
        task.status.label()
    );
}

/// Delete a task.
pub fn cmd_delete(session: &mut FileSession, id: String) {
    let task_id = or_exit(resolve_task_identifier(&id, session.db()), "Error resolving task");
    let removed = or_exit(session.delete_task(&task_id), "Failed to delete task");
    println!("Deleted {} - {}", short_id(&removed.id), removed.display_title());
}

/// Print the statistics block for the selected month.
pub fn cmd_stats(session: &FileSession) {
    let stats = session.stats();
    println!("{} {}", month_name(session.month()), session.year());
    println!("Total planned:   {}", stats.total);
    println!("Completed:       {}", stats.completed);
    println!("In progress:     {}", stats.in_progress);
    println!("Not started:     {}", stats.not_started);
    println!("Completion rate: {}%", stats.rate);
}

/// Print the calendar grid for the selected month.
pub fn cmd_calendar(session: &FileSession) {
    println!("{} {}", month_name(session.month()), session.year());
    for line in calendar_lines(&session.calendar(), &session.day_plans()) {
        println!("{line}");
    }
    println!("* planned   + has a completed task");
}

/// Lay calendar cells out in rows of seven.
///
/// A day with tasks is suffixed `*`, or `+` when one of them is completed.
pub fn calendar_lines(cells: &[Option<u32>], plans: &[DayPlan]) -> Vec<String> {
    let header = WEEKDAYS.iter().map(|d| format!("{d:>4}")).collect::<Vec<_>>().join("");
    let mut lines = vec![header];
    for week in cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                None => "    ".to_string(),
                Some(day) => {
                    let marker = plans
                        .iter()
                        .find(|p| p.day == *day)
                        .map(|p| {
                            if p.completed_count > 0 {
                                "+"
                            } else if p.planned_count > 0 {
                                "*"
                            } else {
                                " "
                            }
                        })
                        .unwrap_or(" ");
                    format!("{day:>3}{marker}")
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }
    lines
}

/// Show or edit the review for the selected month.
pub fn cmd_review(
    session: &mut FileSession,
    achievements: Option<String>,
    next_plan: Option<String>,
) {
    if let Some(text) = achievements {
        or_exit(session.update_review(ReviewField::Achievements, text), "Failed to save review");
    }
    if let Some(text) = next_plan {
        or_exit(session.update_review(ReviewField::NextPlan, text), "Failed to save review");
    }

    println!("{} {} review", month_name(session.month()), session.year());
    for field in [ReviewField::Achievements, ReviewField::NextPlan] {
        let text = session.review().map(|r| r.field(field)).unwrap_or("");
        let text = if text.is_empty() { "(empty)" } else { text };
        println!("{}: {}", field.label(), text);
    }
}

/// Export all tasks to a CSV file.
pub fn cmd_export(session: &FileSession, output: PathBuf, annual: bool, escape: bool) {
    let quoting = if escape { CsvQuoting::Rfc4180 } else { CsvQuoting::Raw };
    let mut sink = DirectorySink::new(output);
    match session.export(&mut sink, annual, quoting) {
        Ok(path) => println!("Exported {} task(s) to {}", session.tasks().len(), path.display()),
        Err(e @ PlanError::NothingToExport) => println!("{e}"),
        Err(e) => {
            eprintln!("Failed to write CSV file: {e}");
            std::process::exit(1);
        }
    }
}

/// Print completion scripts for `shell`.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{calendar_layout, day_plans, filter_and_sort_by_month};
    use crate::task::Task;
    use chrono::NaiveDate;

    #[test]
    fn calendar_lines_mark_planned_and_completed_days() {
        let created = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let planned = Task::new("planned", 0, 1, created);
        let mut done = Task::new("done", 0, 2, created);
        done.status = TaskStatus::Completed;
        let tasks = vec![planned, done];
        let month = filter_and_sort_by_month(&tasks, 0);

        let lines = calendar_lines(&calendar_layout(2026, 0), &day_plans(&month, 2026, 0));
        assert_eq!(lines[0], " Mon Tue Wed Thu Fri Sat Sun");
        assert_eq!(lines[1], "              1*  2+  3   4");
        // header + 5 weeks
        assert_eq!(lines.len(), 6);
    }
}
