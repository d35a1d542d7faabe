//! Todo service — use-cases for the todo list.
//!
//! Failures of the data store are logged, surfaced to the user through the
//! [`Notifier`], and then returned to the caller. Nothing is applied
//! optimistically, so there is no local state to roll back.

use tidydo_domain::error::TidyError;
use tidydo_domain::id::TodoId;
use tidydo_domain::notice::Notice;
use tidydo_domain::todo::{Todo, TodoStats, normalize_text};

use crate::ports::{Confirmation, ConfirmationGate, Notifier, TodoRepository};

/// Result of a guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The user declined; the store was not called.
    Cancelled,
}

/// Result of a guarded clear-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared { deleted_count: usize },
    /// The user declined; the store was not called.
    Cancelled,
}

/// Application service for todo interactions.
pub struct TodoService<R, N> {
    repo: R,
    notifier: N,
}

impl<R: TodoRepository, N: Notifier> TodoService<R, N> {
    /// Create a new service backed by the given repository and notifier.
    pub fn new(repo: R, notifier: N) -> Self {
        Self { repo, notifier }
    }

    fn report(&self, action: &str, err: &TidyError) {
        tracing::error!(error = %err, action, "todo operation failed");
        self.notifier
            .notify(Notice::error("Error", format!("Failed to {action} todo")));
    }

    /// List all todos, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, TidyError> {
        self.repo.get_all().await
    }

    /// Progress statistics over the current list.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn stats(&self) -> Result<TodoStats, TidyError> {
        let todos = self.repo.get_all().await?;
        Ok(TodoStats::from_todos(&todos))
    }

    /// Create a todo from user input.
    ///
    /// # Errors
    ///
    /// Returns [`TidyError::Validation`] for blank or oversized text (not
    /// reported as a notice), or the surfaced repository error.
    pub async fn add_todo(&self, text: &str) -> Result<Todo, TidyError> {
        let todo = Todo::builder().text(text).build()?;
        self.repo.create(todo).await.inspect_err(|err| {
            self.report("add", err);
        })
    }

    /// Flip a todo between open and completed.
    ///
    /// # Errors
    ///
    /// Returns the surfaced repository error, e.g. [`TidyError::NotFound`].
    pub async fn toggle_todo(&self, id: TodoId) -> Result<Todo, TidyError> {
        self.repo.toggle(id).await.inspect_err(|err| {
            self.report("toggle", err);
        })
    }

    /// Replace the text of a todo. The text is trimmed first.
    ///
    /// # Errors
    ///
    /// Returns [`TidyError::Validation`] for blank or oversized text, or the
    /// surfaced repository error.
    pub async fn update_todo(&self, id: TodoId, text: &str) -> Result<Todo, TidyError> {
        let text = normalize_text(text).inspect_err(|err| {
            self.report("update", &TidyError::Validation(err.clone()));
        })?;
        self.repo.update_text(id, text).await.inspect_err(|err| {
            self.report("update", err);
        })
    }

    /// Delete a todo once `gate` affirms [`Confirmation::DELETE_TODO`].
    ///
    /// # Errors
    ///
    /// Returns the surfaced repository error.
    pub async fn delete_todo(
        &self,
        id: TodoId,
        gate: &impl ConfirmationGate,
    ) -> Result<Deletion, TidyError> {
        if !gate.confirm(&Confirmation::DELETE_TODO).await {
            tracing::debug!(%id, "todo deletion cancelled");
            return Ok(Deletion::Cancelled);
        }
        self.repo.delete(id).await.inspect_err(|err| {
            self.report("delete", err);
        })?;
        Ok(Deletion::Deleted)
    }

    /// Delete every todo once `gate` affirms [`Confirmation::CLEAR_ALL`].
    ///
    /// On success an info notice reports how many todos were removed.
    ///
    /// # Errors
    ///
    /// Returns the surfaced repository error.
    pub async fn clear_all(&self, gate: &impl ConfirmationGate) -> Result<ClearOutcome, TidyError> {
        if !gate.confirm(&Confirmation::CLEAR_ALL).await {
            tracing::debug!("clear all cancelled");
            return Ok(ClearOutcome::Cancelled);
        }
        let deleted_count = self.repo.clear_all().await.inspect_err(|err| {
            tracing::error!(error = %err, "clearing all todos failed");
            self.notifier
                .notify(Notice::error("Error", "Failed to clear all todos"));
        })?;
        tracing::info!(deleted_count, "all todos cleared");
        self.notifier.notify(Notice::info(
            "App Reset",
            format!("Successfully deleted {deleted_count} todo(s). Your app has been reset."),
        ));
        Ok(ClearOutcome::Cleared { deleted_count })
    }
}
