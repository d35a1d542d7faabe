//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use tidydo_app::ports::{KeyValueStore, TodoRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Serves API routes under `/api` and a liveness probe at `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R, S>(state: AppState<R, S>) -> Router
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
