//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod notices;
#[allow(clippy::missing_errors_doc)]
pub mod preferences;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod todos;

use axum::Router;
use axum::routing::{delete, get, post, put};

use tidydo_app::ports::{KeyValueStore, TodoRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, S>() -> Router<AppState<R, S>>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    Router::new()
        // Todos
        .route(
            "/todos",
            get(todos::list::<R, S>)
                .post(todos::create::<R, S>)
                .delete(todos::clear_all::<R, S>),
        )
        .route("/todos/stats", get(todos::stats::<R, S>))
        .route(
            "/todos/{id}",
            put(todos::update::<R, S>).delete(todos::delete::<R, S>),
        )
        .route("/todos/{id}/toggle", post(todos::toggle::<R, S>))
        // Display mode
        .route(
            "/preferences/display-mode",
            get(preferences::display_mode::<R, S>),
        )
        .route(
            "/preferences/display-mode/toggle",
            post(preferences::toggle::<R, S>),
        )
        .route(
            "/preferences/display-mode/stream",
            get(sse::stream::<R, S>),
        )
        .route("/theme", get(preferences::theme::<R, S>))
        .route("/palettes/{mode}", get(preferences::palette))
        // Notices
        .route("/notices", get(notices::list::<R, S>))
        .route("/notices/{id}", delete(notices::dismiss::<R, S>))
}
