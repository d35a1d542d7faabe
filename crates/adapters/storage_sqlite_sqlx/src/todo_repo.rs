//! `SQLite` implementation of [`TodoRepository`].

use std::future::Future;
use std::str::FromStr;

use chrono::SecondsFormat;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use tidydo_app::ports::TodoRepository;
use tidydo_domain::error::{NotFoundError, TidyError};
use tidydo_domain::id::TodoId;
use tidydo_domain::time::Timestamp;
use tidydo_domain::todo::Todo;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Todo`]s.
struct Wrapper(Todo);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let text: String = row.try_get("text")?;
        let is_completed: bool = row.try_get("is_completed")?;
        let created_at: String = row.try_get("created_at")?;

        let id = TodoId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Todo {
            id,
            text,
            is_completed,
            created_at,
        }))
    }
}

/// Fixed-width RFC 3339 so that `ORDER BY created_at` sorts chronologically.
fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn not_found(id: TodoId) -> TidyError {
    NotFoundError {
        entity: "Todo",
        id: id.to_string(),
    }
    .into()
}

const INSERT: &str = "INSERT INTO todos (id, text, is_completed, created_at) VALUES (?, ?, ?, ?)";
const SELECT_ALL: &str = "SELECT * FROM todos ORDER BY created_at DESC, rowid DESC";
const TOGGLE: &str = "UPDATE todos SET is_completed = NOT is_completed WHERE id = ? RETURNING *";
const UPDATE_TEXT: &str = "UPDATE todos SET text = ? WHERE id = ? RETURNING *";
const DELETE_BY_ID: &str = "DELETE FROM todos WHERE id = ?";
const DELETE_ALL: &str = "DELETE FROM todos";

/// `SQLite`-backed todo repository.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TodoRepository for SqliteTodoRepository {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Todo>, TidyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn create(&self, todo: Todo) -> impl Future<Output = Result<Todo, TidyError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(todo.id.to_string())
                .bind(&todo.text)
                .bind(todo.is_completed)
                .bind(format_timestamp(todo.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(todo)
        }
    }

    fn toggle(&self, id: TodoId) -> impl Future<Output = Result<Todo, TidyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(TOGGLE)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0).ok_or_else(|| not_found(id))
        }
    }

    fn update_text(
        &self,
        id: TodoId,
        text: String,
    ) -> impl Future<Output = Result<Todo, TidyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE_TEXT)
                .bind(text)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            row.map(|w| w.0).ok_or_else(|| not_found(id))
        }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<(), TidyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(not_found(id));
            }
            Ok(())
        }
    }

    fn clear_all(&self) -> impl Future<Output = Result<usize, TidyError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_ALL)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
        }
    }
}
