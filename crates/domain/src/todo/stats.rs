//! Progress statistics over a list of todos.

use serde::Serialize;

use super::Todo;

/// Counts shown on the progress panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Share of completed todos, `0..=100`, rounded down. `0` when empty.
    pub completion_percent: u8,
}

impl TodoStats {
    #[must_use]
    pub fn from_todos(todos: &[Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.is_completed).count();
        let completion_percent = if total == 0 {
            0
        } else {
            u8::try_from(completed * 100 / total).unwrap_or(100)
        };
        Self {
            total,
            completed,
            active: total - completed,
            completion_percent,
        }
    }
}
