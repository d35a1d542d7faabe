//! Server-Sent Events (SSE) stream of display-mode changes.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use tidydo_app::ports::{KeyValueStore, TodoRepository};

use super::preferences::DisplayModeBody;
use crate::state::AppState;

/// `GET /api/preferences/display-mode/stream`
///
/// Sends one `display-mode` frame per change, carrying the same JSON body as
/// `GET /api/preferences/display-mode`. The stream continues until the client
/// disconnects.
pub async fn stream<R, S>(
    State(state): State<AppState<R, S>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    let mode_rx = state.subscribe_mode_changes();
    let mode_stream = BroadcastStream::new(mode_rx).filter_map(|result| match result {
        Ok(mode) => match serde_json::to_string(&DisplayModeBody::from(mode)) {
            Ok(json) => Some(Ok(Event::default().event("display-mode").data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize display mode for SSE stream");
                None
            }
        },
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(n)) => {
            tracing::warn!(skipped = n, "SSE subscriber lagged, some changes were dropped");
            None
        }
    });

    Sse::new(mode_stream).keep_alive(KeepAlive::default())
}
