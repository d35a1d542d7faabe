//! Inline editing of a single todo's text.

use tidydo_domain::error::TidyError;
use tidydo_domain::id::TodoId;
use tidydo_domain::todo::Todo;

use crate::ports::{Notifier, TodoRepository};
use crate::services::todo_service::TodoService;

/// Tracks which todo is being edited and the draft text.
///
/// At most one todo is edited at a time; beginning a new edit replaces the
/// previous draft.
#[derive(Debug, Default)]
pub struct EditSession {
    draft: Option<(TodoId, String)>,
}

impl EditSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `todo`, seeding the draft with its current text.
    pub fn begin(&mut self, todo: &Todo) {
        self.draft = Some((todo.id, todo.text.clone()));
    }

    /// Replace the draft text. Ignored when nothing is being edited.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Some((_, draft)) = &mut self.draft {
            *draft = text.into();
        }
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<TodoId> {
        self.draft.as_ref().map(|(id, _)| *id)
    }

    #[must_use]
    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing_id() == Some(id)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.draft.as_ref().map(|(_, text)| text.as_str())
    }

    /// Drop the draft without saving.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Save the draft through `service`.
    ///
    /// Returns `Ok(None)` when nothing is being edited. On success the session
    /// is closed; on failure the draft stays so the user can retry or cancel.
    ///
    /// # Errors
    ///
    /// Returns the error from [`TodoService::update_todo`], which has already
    /// been surfaced to the user.
    pub async fn save<R, N>(&mut self, service: &TodoService<R, N>) -> Result<Option<Todo>, TidyError>
    where
        R: TodoRepository,
        N: Notifier,
    {
        let Some((id, text)) = &self.draft else {
            return Ok(None);
        };
        let todo = service.update_todo(*id, text).await?;
        self.draft = None;
        Ok(Some(todo))
    }
}
