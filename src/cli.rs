use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::DEFAULT_YEAR;

/// Year planner with monthly statistics, reviews and CSV export.
/// Data lives in ~/.annual_plan or the directory passed via --dir.
#[derive(Parser)]
#[command(name = "plan", version, about = "Annual task planner")]
pub struct Cli {
    /// Directory holding the planner data.
    #[arg(long, global = true, env = "PLAN_DIR")]
    pub dir: Option<PathBuf>,

    /// Planning year (1-9999). Fixed, never taken from the clock.
    #[arg(
        long,
        global = true,
        env = "PLAN_YEAR",
        default_value_t = DEFAULT_YEAR,
        value_parser = clap::value_parser!(i32).range(1..=9999)
    )]
    pub year: i32,

    /// Month to work on: name, abbreviation or 1-12. Defaults to the current month.
    #[arg(long, short, global = true)]
    pub month: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
