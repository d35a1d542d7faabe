//! Todo repository port — the data store holding todos.
//!
//! Mirrors the remote procedures the client relies on: every call either
//! succeeds or fails as a whole, nothing is applied optimistically.

use std::future::Future;

use tidydo_domain::error::TidyError;
use tidydo_domain::id::TodoId;
use tidydo_domain::todo::Todo;

/// Repository for persisting and querying [`Todo`]s.
pub trait TodoRepository {
    /// Get all todos, newest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Todo>, TidyError>> + Send;

    /// Store a new todo.
    fn create(&self, todo: Todo) -> impl Future<Output = Result<Todo, TidyError>> + Send;

    /// Flip the completion flag of a todo and return the updated record.
    ///
    /// Fails with [`TidyError::NotFound`] when `id` does not exist.
    fn toggle(&self, id: TodoId) -> impl Future<Output = Result<Todo, TidyError>> + Send;

    /// Replace the text of a todo and return the updated record.
    ///
    /// Fails with [`TidyError::NotFound`] when `id` does not exist.
    fn update_text(
        &self,
        id: TodoId,
        text: String,
    ) -> impl Future<Output = Result<Todo, TidyError>> + Send;

    /// Delete a todo.
    ///
    /// Fails with [`TidyError::NotFound`] when `id` does not exist.
    fn delete(&self, id: TodoId) -> impl Future<Output = Result<(), TidyError>> + Send;

    /// Delete every todo, returning how many were removed.
    fn clear_all(&self) -> impl Future<Output = Result<usize, TidyError>> + Send;
}
