//! Shared application state for axum handlers.

use std::sync::Arc;

use tokio::sync::broadcast;

use tidydo_app::notice_board::NoticeBoard;
use tidydo_app::ports::{KeyValueStore, TodoRepository};
use tidydo_app::services::preference_store::{PreferenceStore, Subscription};
use tidydo_app::services::todo_service::TodoService;
use tidydo_domain::display_mode::DisplayMode;

/// Capacity of the display-mode change channel feeding SSE clients.
const MODE_CHANNEL_CAPACITY: usize = 16;

/// Application state shared across all axum handlers.
///
/// Generic over the todo repository and the preference storage to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// do not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<R, S> {
    /// Todo use-cases; failures land on [`notices`](Self::notices).
    pub todo_service: Arc<TodoService<R, Arc<NoticeBoard>>>,
    /// Owner of the display mode.
    pub preferences: Arc<PreferenceStore<S>>,
    /// Notices waiting to be shown.
    pub notices: Arc<NoticeBoard>,
    mode_changes: broadcast::Sender<DisplayMode>,
    /// Keeps the broadcast feed registered with the store.
    mode_subscription: Arc<Subscription>,
}

impl<R, S> Clone for AppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            todo_service: Arc::clone(&self.todo_service),
            preferences: Arc::clone(&self.preferences),
            notices: Arc::clone(&self.notices),
            mode_changes: self.mode_changes.clone(),
            mode_subscription: Arc::clone(&self.mode_subscription),
        }
    }
}

impl<R, S> AppState<R, S>
where
    R: TodoRepository + Send + Sync + 'static,
    S: KeyValueStore + Send + Sync + 'static,
{
    /// Create the state, subscribing a broadcast channel to `preferences` so
    /// that every display-mode change reaches connected stream clients.
    pub fn new(
        todo_service: TodoService<R, Arc<NoticeBoard>>,
        notices: Arc<NoticeBoard>,
        preferences: PreferenceStore<S>,
    ) -> Self {
        Self::from_arcs(Arc::new(todo_service), notices, Arc::new(preferences))
    }

    /// Create the state from pre-wrapped `Arc` services.
    ///
    /// Use this when the preference store is shared with other consumers
    /// before constructing the HTTP state.
    pub fn from_arcs(
        todo_service: Arc<TodoService<R, Arc<NoticeBoard>>>,
        notices: Arc<NoticeBoard>,
        preferences: Arc<PreferenceStore<S>>,
    ) -> Self {
        let (mode_changes, _) = broadcast::channel(MODE_CHANNEL_CAPACITY);
        let sender = mode_changes.clone();
        let subscription = preferences.subscribe(move |mode| {
            // Fails only when no stream client is connected.
            let _ = sender.send(mode);
        });
        Self {
            todo_service,
            preferences,
            notices,
            mode_changes,
            mode_subscription: Arc::new(subscription),
        }
    }

    /// Receive every display-mode change made after this call.
    #[must_use]
    pub fn subscribe_mode_changes(&self) -> broadcast::Receiver<DisplayMode> {
        self.mode_changes.subscribe()
    }
}
