//! # Plan - annual task planner
//!
//! A command-line planner for one calendar year. Tasks are placed on a day
//! of a month, carry a status and a priority, and roll up into monthly
//! completion statistics. Each month can also hold free-text review notes.
//!
//! ## Key Features
//!
//! - **Monthly views**: tasks ordered by day, pending list, completion rate
//! - **Calendar**: Monday-first month grid marking planned and completed days
//! - **Monthly reviews**: achievements and next-month plan per month
//! - **CSV export**: `{Year}_Plan_{Month}.csv` or `{Year}_Work_Plan.csv`
//! - **Interactive TUI**: overview report and data-entry views
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive UI
//! plan ui
//!
//! # Add a task on the 15th of January
//! plan add "Write report" --month jan --day 15
//!
//! # Mark it done and check the month
//! plan update "Write report" --status completed
//! plan stats --month jan
//!
//! # Export everything
//! plan export --annual
//! ```
//!
//! Data is stored in `~/.annual_plan/` (or `--dir` / `PLAN_DIR`) as two JSON
//! files, one for tasks and one for monthly reviews. The planning year is
//! fixed (2026 unless `--year` / `PLAN_YEAR` says otherwise).

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod fields;
pub mod plan;
pub mod session;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::{current_month, PlanConfig};
use db::parse_month_input;
use session::Session;

fn main() {
    // Quiet by default. RUST_LOG=debug shows loads and saves.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Completions don't need any data.
    if let Commands::Completions { shell } = &cli.command {
        cmd_completions(*shell);
        return;
    }

    let config = PlanConfig::resolve(cli.dir, cli.year);
    let month = match cli.month.as_deref().map(parse_month_input).transpose() {
        Ok(month) => month.unwrap_or_else(current_month),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Commands::Ui = cli.command {
        cmd_ui(&config, month);
        return;
    }

    let mut session = match Session::open(config.store(), config.year, month) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to load planner data from {}: {e}", config.data_dir.display());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Ui => unreachable!("UI command handled above"),
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Add { title, day, status, priority } =>
            cmd_add(&mut session, title, day, status, priority),

        Commands::List { pending, all, sort, desc } =>
            cmd_list(&session, pending, all, sort, desc),

        Commands::Update { id, title, status, priority, day, to_month } =>
            cmd_update(&mut session, id, title, status, priority, day, to_month),

        Commands::Delete { id } => cmd_delete(&mut session, id),

        Commands::Stats => cmd_stats(&session),

        Commands::Calendar => cmd_calendar(&session),

        Commands::Review { achievements, next_plan } =>
            cmd_review(&mut session, achievements, next_plan),

        Commands::Export { output, annual, escape } =>
            cmd_export(&session, output, annual, escape),
    }
}
