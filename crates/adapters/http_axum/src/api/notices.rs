//! JSON REST handlers for notices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use tidydo_app::ports::{KeyValueStore, TodoRepository};
use tidydo_domain::error::{NotFoundError, TidyError};
use tidydo_domain::id::NoticeId;
use tidydo_domain::notice::Notice;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the dismiss endpoint.
pub enum DismissResponse {
    NoContent,
}

impl IntoResponse for DismissResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/notices` — notices still within their display window.
pub async fn list<R, S>(State(state): State<AppState<R, S>>) -> Json<Vec<Notice>>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    Json(state.notices.active())
}

/// `DELETE /api/notices/{id}`
pub async fn dismiss<R, S>(
    State(state): State<AppState<R, S>>,
    Path(id): Path<String>,
) -> Result<DismissResponse, ApiError>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let notice_id = id
        .parse::<u32>()
        .map(NoticeId)
        .map_err(|_| ApiError::invalid_id(&id))?;
    if state.notices.dismiss(notice_id) {
        Ok(DismissResponse::NoContent)
    } else {
        Err(TidyError::from(NotFoundError {
            entity: "Notice",
            id,
        })
        .into())
    }
}
