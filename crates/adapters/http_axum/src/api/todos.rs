//! JSON REST handlers for todos.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tidydo_app::ports::{Confirmation, KeyValueStore, TodoRepository};
use tidydo_app::services::todo_service::{ClearOutcome, Deletion};
use tidydo_domain::id::TodoId;
use tidydo_domain::todo::{Todo, TodoStats};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or editing a todo.
#[derive(Deserialize)]
pub struct TodoTextRequest {
    pub text: String,
}

/// Query string of destructive endpoints.
///
/// The operation only runs with `?confirm=true`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Body of a `428` answer: the confirmation the client should show.
#[derive(Serialize)]
pub struct ConfirmationBody {
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_label: &'static str,
}

impl From<Confirmation> for ConfirmationBody {
    fn from(value: Confirmation) -> Self {
        Self {
            title: value.title,
            message: value.message,
            confirm_label: value.confirm_label,
        }
    }
}

/// Body returned after clearing every todo.
#[derive(Serialize)]
pub struct ClearedBody {
    pub deleted_count: usize,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Todo>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single todo.
pub enum TodoResponse {
    Ok(Json<Todo>),
    Created(Json<Todo>),
}

impl IntoResponse for TodoResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
    ConfirmationRequired(Json<ConfirmationBody>),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
            Self::ConfirmationRequired(json) => {
                (StatusCode::PRECONDITION_REQUIRED, json).into_response()
            }
        }
    }
}

/// Possible responses from the clear-all endpoint.
pub enum ClearResponse {
    Ok(Json<ClearedBody>),
    ConfirmationRequired(Json<ConfirmationBody>),
}

impl IntoResponse for ClearResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::ConfirmationRequired(json) => {
                (StatusCode::PRECONDITION_REQUIRED, json).into_response()
            }
        }
    }
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    TodoId::from_str(raw).map_err(|_| ApiError::invalid_id(raw))
}

/// `GET /api/todos` — newest first.
pub async fn list<R, S>(State(state): State<AppState<R, S>>) -> Result<ListResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let todos = state.todo_service.list_todos().await?;
    Ok(ListResponse::Ok(Json(todos)))
}

/// `GET /api/todos/stats`
pub async fn stats<R, S>(State(state): State<AppState<R, S>>) -> Result<Json<TodoStats>, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    Ok(Json(state.todo_service.stats().await?))
}

/// `POST /api/todos`
pub async fn create<R, S>(
    State(state): State<AppState<R, S>>,
    Json(req): Json<TodoTextRequest>,
) -> Result<TodoResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let todo = state.todo_service.add_todo(&req.text).await?;
    Ok(TodoResponse::Created(Json(todo)))
}

/// `POST /api/todos/{id}/toggle`
pub async fn toggle<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
) -> Result<TodoResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let todo = state.todo_service.toggle_todo(parse_id(&id)?).await?;
    Ok(TodoResponse::Ok(Json(todo)))
}

/// `PUT /api/todos/{id}`
pub async fn update<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
    Json(req): Json<TodoTextRequest>,
) -> Result<TodoResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let todo = state
        .todo_service
        .update_todo(parse_id(&id)?, &req.text)
        .await?;
    Ok(TodoResponse::Ok(Json(todo)))
}

/// `DELETE /api/todos/{id}?confirm=true`
pub async fn delete<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
    Query(query): Query<ConfirmQuery>,
) -> Result<DeleteResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    match state.todo_service.delete_todo(id, &query.confirm).await? {
        Deletion::Deleted => Ok(DeleteResponse::NoContent),
        Deletion::Cancelled => Ok(DeleteResponse::ConfirmationRequired(Json(
            Confirmation::DELETE_TODO.into(),
        ))),
    }
}

/// `DELETE /api/todos?confirm=true`
pub async fn clear_all<R, S>(
    State(state): State<AppState<R, S>>,
    Query(query): Query<ConfirmQuery>,
) -> Result<ClearResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    match state.todo_service.clear_all(&query.confirm).await? {
        ClearOutcome::Cleared { deleted_count } => {
            Ok(ClearResponse::Ok(Json(ClearedBody { deleted_count })))
        }
        ClearOutcome::Cancelled => Ok(ClearResponse::ConfirmationRequired(Json(
            Confirmation::CLEAR_ALL.into(),
        ))),
    }
}
