//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::TaskStatus;

/// Dusty rose, used for headline numbers and planned days.
pub const ROSE: Color = Color::Rgb(209, 163, 152);
/// Muted teal, used for the completion gauge and the status bar.
pub const TEAL: Color = Color::Rgb(123, 154, 149);
/// Soft accent for borders.
pub const ACCENT: Color = Color::Rgb(232, 213, 207);
/// Body text.
pub const TEXT: Color = Color::Rgb(74, 74, 74);

/// Color a status is drawn in.
pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Completed => Color::Green,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::NotStarted => Color::Gray,
        TaskStatus::Cancelled => Color::LightRed,
    }
}
