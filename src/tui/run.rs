//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};

use crate::config::PlanConfig;
use crate::session::Session;
use crate::tui::app::App;

/// Load the planner, then run the terminal user interface until the user quits.
pub fn run_tui(config: &PlanConfig, month: u32) -> io::Result<()> {
    // Load before touching the terminal so a load failure prints normally.
    let session = Session::open(config.store(), config.year, month).map_err(io::Error::other)?;
    let mut app = App::new(session, std::env::current_dir()?);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
