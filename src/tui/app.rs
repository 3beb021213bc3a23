//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the planner session,
//! handles key presses, and renders the dashboard and task-entry views.
//! Every change goes through the session, so it is saved before the next
//! key is read, and every frame is drawn from freshly derived state.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::db::{month_name, truncate, KeyValueStore};
use crate::error::{PlanError, Result};
use crate::export::DirectorySink;
use crate::fields::*;
use crate::session::Session;
use crate::task::{Task, TaskUpdate};
use crate::tui::{
    colors::{status_color, ACCENT, ROSE, TEAL, TEXT},
    enums::{AppView, InputMode},
    input::InputField,
    utils::centered_rect,
};

/// Day after a `+`/`-` step, wrapping inside `1..=days`.
pub fn shifted_day(day: i32, forward: bool, days: u32) -> i32 {
    let days = days as i32;
    if forward {
        if day >= days { 1 } else { day + 1 }
    } else if day <= 1 || day > days {
        days
    } else {
        day - 1
    }
}

/// A proportional bar of `width` cells.
fn bar(value: usize, total: usize, width: usize) -> String {
    let filled = if total > 0 { value * width / total } else { 0 };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// TUI state: the session plus what is on screen.
pub struct App<S: KeyValueStore> {
    session: Session<S>,
    view: AppView,
    mode: InputMode,
    table_state: TableState,
    input: InputField,
    status_message: String,
    export_dir: PathBuf,
}

impl<S: KeyValueStore> App<S> {
    /// Create the app around an opened session. Exports are written to `export_dir`.
    pub fn new(session: Session<S>, export_dir: PathBuf) -> Self {
        let mut app = App {
            session,
            view: AppView::Dashboard,
            mode: InputMode::Normal,
            table_state: TableState::default(),
            input: InputField::new(),
            status_message: String::new(),
            export_dir,
        };
        app.clamp_selection();
        app
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn view(&self) -> AppView {
        self.view
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Show the outcome of a session call in the status bar.
    fn report<T>(&mut self, result: Result<T>, ok: &str) {
        match result {
            Ok(_) => self.set_status_message(ok),
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    fn selected_task_id(&self) -> Option<String> {
        let idx = self.table_state.selected()?;
        self.session.month_tasks().get(idx).map(|t| t.id.clone())
    }

    fn select_task(&mut self, id: &str) {
        let idx = self.session.month_tasks().iter().position(|t| t.id == id);
        self.table_state.select(idx);
        self.clamp_selection();
    }

    /// Keep the selection on a row that exists.
    fn clamp_selection(&mut self) {
        let len = self.session.month_tasks().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    fn change_month(&mut self, forward: bool) {
        if forward {
            self.session.next_month();
        } else {
            self.session.prev_month();
        }
        self.table_state.select(None);
        self.clamp_selection();
    }

    fn add_task(&mut self) {
        let today = Local::now().date_naive();
        let id = match self.session.add_task("", None, today) {
            Ok(task) => task.id.clone(),
            Err(e) => {
                self.set_status_message(format!("Error: {e}"));
                return;
            }
        };
        self.view = AppView::Tasks;
        self.select_task(&id);
        self.begin_edit_title();
    }

    fn update_selected(&mut self, update: impl FnOnce(&Task, u32) -> TaskUpdate) {
        let Some(id) = self.selected_task_id() else {
            self.set_status_message("No task selected");
            return;
        };
        let days = self.session.days_in_month();
        let Some(task) = self.session.db().get(&id) else {
            return;
        };
        let update = update(task, days);
        if let Err(e) = self.session.update_task(&id, &update).map(|_| ()) {
            self.set_status_message(format!("Error: {e}"));
        }
        // A day change can reorder the month list.
        self.select_task(&id);
    }

    fn delete_selected_task(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.session.delete_task(&id);
            self.report(result, "Deleted 1 task");
            self.clamp_selection();
        }
    }

    fn export(&mut self) {
        let mut sink = DirectorySink::new(&self.export_dir);
        match self.session.export(&mut sink, false, CsvQuoting::Raw) {
            Ok(path) => self.set_status_message(format!("Exported to {}", path.display())),
            Err(e @ PlanError::NothingToExport) => self.set_status_message(e.to_string()),
            Err(e) => self.set_status_message(format!("Export failed: {e}")),
        }
    }

    fn begin_edit_title(&mut self) {
        let Some(id) = self.selected_task_id() else {
            self.set_status_message("No task selected");
            return;
        };
        let title = self.session.db().get(&id).map(|t| t.title.clone()).unwrap_or_default();
        self.input = InputField::with_value(&title);
        self.mode = InputMode::EditTitle;
    }

    fn begin_edit_review(&mut self, field: ReviewField) {
        let text = self.session.review().map(|r| r.field(field)).unwrap_or("");
        self.input = InputField::with_value(text);
        self.mode = InputMode::EditReview(field);
    }

    fn commit_input(&mut self) {
        let value = std::mem::take(&mut self.input.value);
        match self.mode {
            InputMode::EditTitle => {
                if let Some(id) = self.selected_task_id() {
                    let update = TaskUpdate {
                        title: Some(value),
                        ..TaskUpdate::default()
                    };
                    let result = self.session.update_task(&id, &update).map(|_| ());
                    self.report(result, "Task saved");
                }
            }
            InputMode::EditReview(field) => {
                let result = self.session.update_review(field, value);
                self.report(result, "Review saved");
            }
            _ => {}
        }
        self.mode = InputMode::Normal;
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.mode {
            InputMode::Normal => self.handle_normal_input(key),
            InputMode::EditTitle | InputMode::EditReview(_) => {
                self.handle_edit_input(key);
                false
            }
            InputMode::ConfirmDelete => {
                self.handle_confirm_input(key);
                false
            }
            InputMode::Help => {
                if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
                    self.mode = InputMode::Normal;
                }
                false
            }
        }
    }

    fn handle_normal_input(&mut self, key: KeyCode) -> bool {
        self.status_message.clear();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.change_month(false),
            KeyCode::Right => self.change_month(true),
            KeyCode::Tab => self.view = self.view.toggle(),
            KeyCode::Up => {
                if let Some(selected) = self.table_state.selected() {
                    self.table_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.table_state.selected() {
                    self.table_state.select(Some(selected + 1));
                    self.clamp_selection();
                }
            }
            KeyCode::Char('n') => self.add_task(),
            KeyCode::Char('e') | KeyCode::Enter => self.begin_edit_title(),
            KeyCode::Char('s') => self.update_selected(|t, _| TaskUpdate {
                status: Some(t.status.cycle()),
                ..TaskUpdate::default()
            }),
            KeyCode::Char('p') => self.update_selected(|t, _| TaskUpdate {
                priority: Some(t.priority.cycle()),
                ..TaskUpdate::default()
            }),
            KeyCode::Char('+') | KeyCode::Char('=') => self.update_selected(|t, days| TaskUpdate {
                day: Some(shifted_day(t.day, true, days)),
                ..TaskUpdate::default()
            }),
            KeyCode::Char('-') => self.update_selected(|t, days| TaskUpdate {
                day: Some(shifted_day(t.day, false, days)),
                ..TaskUpdate::default()
            }),
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.selected_task_id().is_some() {
                    self.mode = InputMode::ConfirmDelete;
                }
            }
            KeyCode::Char('a') => self.begin_edit_review(ReviewField::Achievements),
            KeyCode::Char('r') => self.begin_edit_review(ReviewField::NextPlan),
            KeyCode::Char('x') => self.export(),
            KeyCode::Char('h') | KeyCode::Char('?') => self.mode = InputMode::Help,
            _ => {}
        }
        false
    }

    fn handle_edit_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.commit_input(),
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.set_status_message("Edit cancelled");
            }
            KeyCode::Char(c) => self.input.handle_char(c),
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.mode = InputMode::Normal;
                self.delete_selected_task();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Poll for one key event and handle it. Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let month = format!("< {} {} >", month_name(self.session.month()), self.session.year());
        let tab = |view: AppView| {
            let style = if self.view == view {
                Style::default().fg(Color::Black).bg(ROSE).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(TEXT)
            };
            Span::styled(format!(" {} ", view.title()), style)
        };
        let line = Line::from(vec![
            Span::styled("Plan ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                self.session.year().to_string(),
                Style::default().fg(ROSE).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(month, Style::default().fg(TEAL).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            tab(AppView::Dashboard),
            Span::raw(" "),
            tab(AppView::Tasks),
        ]);
        let header = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(ACCENT)),
        );
        f.render_widget(header, area);
    }

    fn render_stats(&self, f: &mut Frame, area: Rect) {
        let stats = self.session.stats();
        let block = Block::default()
            .title("Monthly Overview")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(inner);

        let total = Line::from(vec![
            Span::styled(
                stats.total.to_string(),
                Style::default().fg(ROSE).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  TOTAL PLANNED"),
        ]);
        f.render_widget(Paragraph::new(total), rows[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(TEAL))
            .label(format!("Completion Rate {}%", stats.rate))
            .percent(stats.rate.min(100) as u16);
        f.render_widget(gauge, rows[2]);

        let width = (inner.width as usize).saturating_sub(20).max(4);
        let lines: Vec<Line> = [
            ("Completed", stats.completed),
            ("In Progress", stats.in_progress),
            ("Not Started", stats.not_started),
        ]
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::raw(format!("{label:<12}")),
                Span::styled(bar(value, stats.total, width), Style::default().fg(ROSE)),
                Span::raw(format!(" {value}")),
            ])
        })
        .collect();
        f.render_widget(Paragraph::new(lines), rows[3]);
    }

    fn render_calendar(&self, f: &mut Frame, area: Rect) {
        let plans = self.session.day_plans();
        let mut lines = vec![Line::from(
            WEEKDAYS
                .iter()
                .map(|d| Span::styled(format!("{:>4}", &d[..1]), Style::default().fg(ROSE)))
                .collect::<Vec<_>>(),
        )];
        for week in self.session.calendar().chunks(7) {
            let spans: Vec<Span> = week
                .iter()
                .map(|cell| match cell {
                    None => Span::raw("    "),
                    Some(day) => {
                        let plan = plans.iter().find(|p| p.day == *day);
                        let planned = plan.map(|p| p.planned_count > 0).unwrap_or(false);
                        let done = plan.map(|p| p.completed_count > 0).unwrap_or(false);
                        let marker = if done { "•" } else { " " };
                        let style = if planned {
                            Style::default().fg(ROSE).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::DarkGray)
                        };
                        Span::styled(format!("{day:>3}{marker}"), style)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }
        let block = Block::default()
            .title(format!("{} {}", self.session.month() + 1, month_name(self.session.month())))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_pending(&self, f: &mut Frame, area: Rect) {
        let pending = self.session.pending_tasks();
        let dim = Style::default().fg(Color::DarkGray);
        let lines: Vec<Line> = if pending.is_empty() {
            vec![Line::from(Span::styled(
                "Your schedule is clear for now!",
                Style::default().add_modifier(Modifier::ITALIC),
            ))]
        } else {
            pending
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    Line::from(vec![
                        Span::styled(format!("{:>2} ", i + 1), dim),
                        Span::raw(truncate(t.display_title(), 40)),
                        Span::styled(format!("  Day {}", t.day), dim),
                        Span::styled(
                            format!("  {}", t.status.label()),
                            Style::default().fg(status_color(t.status)),
                        ),
                    ])
                })
                .collect()
        };
        let block = Block::default()
            .title("Pending Tasks")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_reviews(&self, f: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let placeholders = [
            (ReviewField::Achievements, "What went well this month? Press 'a' to write."),
            (ReviewField::NextPlan, "Top priorities for next month... Press 'r' to write."),
        ];
        for ((field, placeholder), rect) in placeholders.into_iter().zip(halves.iter()) {
            let text = self.session.review().map(|r| r.field(field)).unwrap_or("");
            let paragraph = if text.is_empty() {
                Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray)))
            } else {
                Paragraph::new(text.to_string())
            };
            let block = Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT));
            f.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), *rect);
        }
    }

    fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(9)])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(10)])
            .split(columns[1]);

        self.render_stats(f, left[0]);
        self.render_calendar(f, left[1]);
        self.render_pending(f, right[0]);
        self.render_reviews(f, right[1]);
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        let month_tasks = self.session.month_tasks();
        if month_tasks.is_empty() {
            let text = format!(
                "Press 'n' to start planning {}.",
                month_name(self.session.month())
            );
            let empty = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(ACCENT)),
                );
            f.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = month_tasks
            .iter()
            .map(|t| {
                Row::new(vec![
                    Cell::from(t.day.to_string()),
                    Cell::from(t.display_title().to_string()),
                    Cell::from(t.priority.as_str()),
                    Cell::from(t.status.label()).style(Style::default().fg(status_color(t.status))),
                ])
            })
            .collect();
        let header = Row::new(vec!["Day", "Task", "Priority", "Status"])
            .style(Style::default().fg(ROSE).add_modifier(Modifier::BOLD));
        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Min(20),
                Constraint::Length(9),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!("{} tasks", month_name(self.session.month())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .row_highlight_style(Style::default().bg(ACCENT).fg(Color::Black));

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_input_popup(&self, f: &mut Frame, area: Rect, title: &str) {
        let area = centered_rect(60, 20, area);
        f.render_widget(Clear, area);
        let block = Block::default()
            .title(format!("{title} (Enter to save, Esc to cancel)"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TEAL));
        let inner = block.inner(area);
        f.render_widget(Paragraph::new(self.input.value.as_str()).block(block), area);
        let x = inner.x + (self.input.cursor() as u16).min(inner.width.saturating_sub(1));
        f.set_cursor_position((x, inner.y));
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);
        let title = self
            .selected_task_id()
            .and_then(|id| self.session.db().get(&id).map(|t| t.display_title().to_string()))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(truncate(&title, 40)),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let block = Block::default().title("Confirm Action").borders(Borders::ALL);
        f.render_widget(
            Paragraph::new(text).block(block).alignment(Alignment::Center),
            area,
        );
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);
        let keys = [
            ("Left / Right", "Previous / next month"),
            ("Tab", "Switch overview and data entry"),
            ("Up / Down", "Select task"),
            ("n", "New task"),
            ("e / Enter", "Edit title"),
            ("s / p", "Cycle status / priority"),
            ("+ / -", "Next / previous day"),
            ("d", "Delete task"),
            ("a / r", "Edit achievements / next month plan"),
            ("x", "Export CSV"),
            ("q / Esc", "Quit"),
        ];
        let lines: Vec<Line> = keys
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{key:<14}"),
                        Style::default().fg(ROSE).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*what),
                ])
            })
            .collect();
        let block = Block::default().title("Help").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            format!(
                "Tasks: {} | Left/Right month | Tab view | n new | x export | h help",
                self.session.month_tasks().len()
            )
        };
        let status = Paragraph::new(text).style(Style::default().bg(TEAL).fg(Color::White));
        f.render_widget(status, area);
    }

    /// Draw one frame.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.view {
            AppView::Dashboard => self.render_dashboard(f, chunks[1]),
            AppView::Tasks => self.render_tasks(f, chunks[1]),
        }
        match self.mode {
            InputMode::EditTitle => self.render_input_popup(f, chunks[1], "Task"),
            InputMode::EditReview(field) => self.render_input_popup(f, chunks[1], field.label()),
            InputMode::ConfirmDelete => self.render_confirm(f, chunks[1]),
            InputMode::Help => self.render_help(f, chunks[1]),
            InputMode::Normal => {}
        }
        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop. Handles rendering and input until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, MemoryStore};
    use ratatui::backend::TestBackend;

    fn app(month: u32) -> App<MemoryStore> {
        let session = Session::open(MemoryStore::default(), 2026, month).unwrap();
        App::new(session, std::env::temp_dir())
    }

    fn press(app: &mut App<MemoryStore>, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shifted_day_wraps_within_month() {
        assert_eq!(shifted_day(28, true, 28), 1);
        assert_eq!(shifted_day(1, false, 28), 28);
        assert_eq!(shifted_day(31, false, 28), 28);
        assert_eq!(shifted_day(31, true, 28), 1);
        assert_eq!(shifted_day(10, true, 31), 11);
        assert_eq!(shifted_day(-2, true, 30), 1);
        assert_eq!(shifted_day(0, false, 30), 30);
    }

    #[test]
    fn bar_is_proportional() {
        assert_eq!(bar(1, 2, 4), "██░░");
        assert_eq!(bar(0, 0, 3), "░░░");
    }

    #[test]
    fn new_task_opens_title_editor_and_saves() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.view(), AppView::Tasks);
        assert_eq!(app.mode(), InputMode::EditTitle);

        type_text(&mut app, "Write report");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode(), InputMode::Normal);

        let stored = Database::load(app.session().store()).unwrap();
        assert_eq!(stored.tasks.len(), 1);
        assert_eq!(stored.tasks[0].title, "Write report");
        assert_eq!(stored.tasks[0].month, 0);
    }

    #[test]
    fn status_cycle_updates_stats() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.session().stats().rate, 0);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session().tasks()[0].status, TaskStatus::Completed);
        assert_eq!(app.session().stats().rate, 100);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), InputMode::ConfirmDelete);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session().tasks().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.session().tasks().is_empty());
    }

    #[test]
    fn review_edit_is_saved_for_selected_month() {
        let mut app = app(0);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().month(), 1);

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "ran 10k");
        press(&mut app, KeyCode::Enter);

        let stored = Database::load(app.session().store()).unwrap();
        assert_eq!(stored.reviews[&1].achievements, "ran 10k");
        assert_eq!(stored.reviews[&1].next_plan, "");
    }

    #[test]
    fn export_with_no_tasks_shows_notice() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.status_message(), "No tasks to export yet!");
    }

    #[test]
    fn month_navigation_wraps_and_quit_keys_work() {
        let mut app = app(0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session().month(), 11);
        assert!(!press(&mut app, KeyCode::Tab));
        assert_eq!(app.view(), AppView::Tasks);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn dashboard_renders_month_and_stats() {
        let mut app = app(0);
        let text = screen(&mut app);
        assert!(text.contains("January 2026"));
        assert!(text.contains("TOTAL PLANNED"));
        assert!(text.contains("Your schedule is clear for now!"));
    }

    #[test]
    fn task_view_lists_month_tasks() {
        let mut app = app(0);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Call bank");
        press(&mut app, KeyCode::Enter);

        let text = screen(&mut app);
        assert!(text.contains("Call bank"));
        assert!(text.contains("not started"));
    }
}
