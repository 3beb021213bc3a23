//! Enumerations for TUI state management.

use crate::fields::ReviewField;

/// Which screen is shown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppView {
    Dashboard,
    Tasks,
}

impl AppView {
    pub fn toggle(self) -> Self {
        match self {
            AppView::Dashboard => AppView::Tasks,
            AppView::Tasks => AppView::Dashboard,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppView::Dashboard => "Overview Report",
            AppView::Tasks => "Data Entry",
        }
    }
}

/// What keyboard input currently drives.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    EditTitle,
    EditReview(ReviewField),
    ConfirmDelete,
    Help,
}
