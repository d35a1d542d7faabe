//! Todo — a single text item that can be completed.

mod stats;

pub use stats::TodoStats;

use serde::{Deserialize, Serialize};

use crate::error::{TidyError, ValidationError};
use crate::id::TodoId;
use crate::time::{Timestamp, now};

/// Maximum length of a todo text, in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub is_completed: bool,
    pub created_at: Timestamp,
}

impl Todo {
    /// Create a builder for constructing a [`Todo`].
    #[must_use]
    pub fn builder() -> TodoBuilder {
        TodoBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TidyError::Validation`] when the text is blank or too long.
    pub fn validate(&self) -> Result<(), TidyError> {
        normalize_text(&self.text)?;
        Ok(())
    }
}

/// Trim a todo text and check its length.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyText`] for blank input and
/// [`ValidationError::TextTooLong`] past [`MAX_TEXT_LEN`] characters.
pub fn normalize_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let len = trimmed.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TextTooLong {
            len,
            max: MAX_TEXT_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Step-by-step builder for [`Todo`].
#[derive(Debug, Default)]
pub struct TodoBuilder {
    id: Option<TodoId>,
    text: Option<String>,
    is_completed: bool,
    created_at: Option<Timestamp>,
}

impl TodoBuilder {
    #[must_use]
    pub fn id(mut self, id: TodoId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, normalize the text, and return a [`Todo`].
    ///
    /// # Errors
    ///
    /// Returns [`TidyError::Validation`] if the text is missing, blank, or too long.
    pub fn build(self) -> Result<Todo, TidyError> {
        let text = normalize_text(self.text.as_deref().unwrap_or_default())?;
        Ok(Todo {
            id: self.id.unwrap_or_default(),
            text,
            is_completed: self.is_completed,
            created_at: self.created_at.unwrap_or_else(now),
        })
    }
}
