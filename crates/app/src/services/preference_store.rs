//! Preference store — owns the display mode, persists it, and fans out changes.
//!
//! The store is constructed explicitly and injected wherever the mode is
//! needed. Views either hold the store itself or a [`PreferenceHandle`], and
//! learn about changes through [`subscribe`](PreferenceStore::subscribe).
//!
//! Persistence never sits on the interaction path: the initial read and every
//! write run as detached tokio tasks whose failures are logged and dropped.
//! The in-memory value is authoritative for the lifetime of the process.

use std::collections::BTreeMap;
use std::future::IntoFuture;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use tidydo_domain::display_mode::DisplayMode;
use tidydo_domain::palette::Theme;

use crate::ports::KeyValueStore;

/// Storage key of the persisted display mode.
pub const DISPLAY_MODE_KEY: &str = "darkMode";

type Callback = Arc<dyn Fn(DisplayMode) + Send + Sync>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Subscribers {
    callbacks: Mutex<BTreeMap<u64, Callback>>,
    next_id: AtomicU64,
}

impl Subscribers {
    fn insert(&self, callback: Callback) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.callbacks).insert(id, callback);
        id
    }

    fn remove(&self, id: u64) {
        lock(&self.callbacks).remove(&id);
    }

    fn len(&self) -> usize {
        lock(&self.callbacks).len()
    }

    /// Call every subscriber with `mode`. Callbacks run outside the lock so
    /// they may read the store or (un)subscribe.
    fn notify(&self, mode: DisplayMode) {
        let callbacks: Vec<Callback> = lock(&self.callbacks).values().cloned().collect();
        for callback in callbacks {
            callback(mode);
        }
    }
}

#[derive(Default)]
struct State {
    mode: DisplayMode,
    /// Set by the first toggle; a persisted value arriving later is stale.
    toggled: bool,
}

struct Shared<S> {
    state: Mutex<State>,
    /// Held from a mode change until its subscribers have been notified, so
    /// notifications arrive in the order the changes were made.
    changes: Mutex<()>,
    subscribers: Arc<Subscribers>,
    activated: AtomicBool,
    storage: Arc<S>,
}

impl<S> Shared<S>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    fn current_mode(&self) -> DisplayMode {
        lock(&self.state).mode
    }

    fn toggle(&self) -> Toggled {
        let runtime = Handle::current();
        let _changing = lock(&self.changes);
        let mode = {
            let mut state = lock(&self.state);
            state.mode = state.mode.toggled();
            state.toggled = true;
            state.mode
        };
        tracing::debug!(%mode, "display mode toggled");
        self.subscribers.notify(mode);
        let write = runtime.spawn(persist(Arc::clone(&self.storage), mode));
        Toggled { mode, write }
    }

    fn subscribe(&self, callback: Callback) -> Subscription {
        let id = self.subscribers.insert(callback);
        Subscription {
            subscribers: Arc::downgrade(&self.subscribers),
            id,
        }
    }

    fn apply_persisted(&self, mode: DisplayMode) {
        let _changing = lock(&self.changes);
        {
            let mut state = lock(&self.state);
            if state.toggled {
                tracing::debug!(%mode, "discarding persisted display mode, already toggled");
                return;
            }
            if state.mode == mode {
                return;
            }
            state.mode = mode;
        }
        tracing::info!(%mode, "restored persisted display mode");
        self.subscribers.notify(mode);
    }
}

/// Read the persisted mode. Anything but a valid JSON boolean counts as absent.
async fn load_persisted<S: KeyValueStore>(storage: &S) -> Option<DisplayMode> {
    let raw = match storage.get(DISPLAY_MODE_KEY).await {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return None,
        Err(err) => {
            tracing::warn!(error = %err, "failed to read persisted display mode");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(mode) => Some(mode),
        Err(err) => {
            tracing::warn!(%err, value = %raw, "ignoring unparsable persisted display mode");
            None
        }
    }
}

async fn persist<S: KeyValueStore + Send + Sync>(storage: Arc<S>, mode: DisplayMode) {
    let encoded = match serde_json::to_string(&mode) {
        Ok(encoded) => encoded,
        Err(err) => {
            tracing::warn!(%err, "failed to encode display mode");
            return;
        }
    };
    if let Err(err) = storage.set(DISPLAY_MODE_KEY, encoded).await {
        tracing::warn!(error = %err, %mode, "failed to persist display mode");
    }
}

/// Single source of truth for the [`DisplayMode`].
///
/// Starts in [`DisplayMode::Light`]. Call [`activate`](Self::activate) once
/// at startup to restore the persisted value.
pub struct PreferenceStore<S> {
    shared: Arc<Shared<S>>,
}

impl<S> PreferenceStore<S>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    /// Create a store in the default mode, backed by `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                changes: Mutex::new(()),
                subscribers: Arc::new(Subscribers::default()),
                activated: AtomicBool::new(false),
                storage: Arc::new(storage),
            }),
        }
    }

    /// Start the one-time read of the persisted mode.
    ///
    /// Returns the detached task on the first call and `None` afterwards.
    /// Until the task completes the store keeps its default mode. A value
    /// that arrives after the user already toggled is discarded.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn activate(&self) -> Option<JoinHandle<()>> {
        let runtime = Handle::current();
        if self.shared.activated.swap(true, Ordering::AcqRel) {
            return None;
        }
        let storage = Arc::clone(&self.shared.storage);
        let shared = Arc::downgrade(&self.shared);
        Some(runtime.spawn(async move {
            let Some(mode) = load_persisted(&*storage).await else {
                return;
            };
            if let Some(shared) = shared.upgrade() {
                shared.apply_persisted(mode);
            }
        }))
    }

    /// The active display mode.
    pub fn current_mode(&self) -> DisplayMode {
        self.shared.current_mode()
    }

    /// The active mode together with its palette.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.current_mode())
    }

    /// Flip the display mode.
    ///
    /// The new value is visible to readers and delivered to every subscriber
    /// before this returns. Concurrent toggles are applied one at a time, so
    /// subscribers see the changes in the order they were made. The write to
    /// storage runs in a detached task; awaiting the returned [`Toggled`] is
    /// optional and a failed write does not roll the mode back.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn toggle(&self) -> Toggled {
        self.shared.toggle()
    }

    /// Register `callback` to be called with the new mode on every change.
    ///
    /// The callback may read the store but must not toggle it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(DisplayMode) + Send + Sync + 'static,
    {
        self.shared.subscribe(Arc::new(callback))
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.len()
    }

    /// A handle for views that must not keep the store alive.
    pub fn handle(&self) -> PreferenceHandle<S> {
        PreferenceHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }
}

/// Non-owning access to a [`PreferenceStore`].
///
/// Using a handle whose store has been dropped is a programming error and
/// panics; use [`try_current_mode`](Self::try_current_mode) to probe.
pub struct PreferenceHandle<S> {
    shared: Weak<Shared<S>>,
}

impl<S> Clone for PreferenceHandle<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
        }
    }
}

impl<S> PreferenceHandle<S>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    fn shared(&self) -> Arc<Shared<S>> {
        self.shared
            .upgrade()
            .expect("preference store accessed outside of its lifetime")
    }

    /// The active display mode.
    ///
    /// # Panics
    ///
    /// Panics if the store has been dropped.
    pub fn current_mode(&self) -> DisplayMode {
        self.shared().current_mode()
    }

    /// The active display mode, or `None` once the store is gone.
    pub fn try_current_mode(&self) -> Option<DisplayMode> {
        self.shared.upgrade().map(|shared| shared.current_mode())
    }

    /// The active mode together with its palette.
    ///
    /// # Panics
    ///
    /// Panics if the store has been dropped.
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.current_mode())
    }

    /// See [`PreferenceStore::toggle`].
    ///
    /// # Panics
    ///
    /// Panics if the store has been dropped or outside a tokio runtime.
    pub fn toggle(&self) -> Toggled {
        self.shared().toggle()
    }

    /// See [`PreferenceStore::subscribe`].
    ///
    /// # Panics
    ///
    /// Panics if the store has been dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(DisplayMode) + Send + Sync + 'static,
    {
        self.shared().subscribe(Arc::new(callback))
    }
}

/// Outcome of a toggle: the mode it produced and the pending write.
///
/// Awaiting it waits for the write to storage.
#[derive(Debug)]
pub struct Toggled {
    mode: DisplayMode,
    write: JoinHandle<()>,
}

impl Toggled {
    /// The mode set by this toggle.
    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }
}

impl IntoFuture for Toggled {
    type Output = Result<(), tokio::task::JoinError>;
    type IntoFuture = JoinHandle<()>;

    fn into_future(self) -> Self::IntoFuture {
        self.write
    }
}

/// A registered change callback. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    subscribers: Weak<Subscribers>,
    id: u64,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::atomic::AtomicUsize;
    use tidydo_domain::error::TidyError;
    use tidydo_domain::palette::{self, DARK, LIGHT};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct InMemoryStore {
        values: Mutex<HashMap<String, String>>,
        reads: AtomicUsize,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl InMemoryStore {
        fn with_value(value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .lock()
                .unwrap()
                .insert(DISPLAY_MODE_KEY.to_string(), value.to_string());
            store
        }

        fn stored(&self) -> Option<String> {
            self.values.lock().unwrap().get(DISPLAY_MODE_KEY).cloned()
        }
    }

    fn io_error() -> TidyError {
        TidyError::Storage(Box::new(std::io::Error::other("disk unavailable")))
    }

    impl KeyValueStore for InMemoryStore {
        fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, TidyError>> + Send {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let result = if self.fail_reads {
                Err(io_error())
            } else {
                Ok(self.values.lock().unwrap().get(key).cloned())
            };
            async { result }
        }

        fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), TidyError>> + Send {
            let result = if self.fail_writes {
                Err(io_error())
            } else {
                self.values.lock().unwrap().insert(key.to_string(), value);
                Ok(())
            };
            async { result }
        }
    }

    /// Holds the read back until `release` is notified.
    struct SlowStore {
        value: &'static str,
        release: Notify,
    }

    impl KeyValueStore for SlowStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, TidyError> {
            self.release.notified().await;
            Ok(Some(self.value.to_string()))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), TidyError> {
            Ok(())
        }
    }

    fn counter<S>(store: &PreferenceStore<S>) -> (Arc<AtomicUsize>, Subscription)
    where
        S: KeyValueStore + Send + Sync + 'static,
    {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let sub = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[test]
    fn should_start_in_light_mode() {
        let store = PreferenceStore::new(InMemoryStore::default());
        assert_eq!(store.current_mode(), DisplayMode::Light);
        assert!(std::ptr::eq(store.theme().palette, &LIGHT));
    }

    #[tokio::test]
    async fn should_follow_parity_of_toggle_count() {
        let store = PreferenceStore::new(InMemoryStore::default());
        for n in 1..=7 {
            store.toggle().await.unwrap();
            assert_eq!(store.current_mode().is_dark(), n % 2 == 1, "after {n} toggles");
        }
    }

    #[tokio::test]
    async fn should_report_mode_set_by_each_toggle() {
        let store = PreferenceStore::new(InMemoryStore::default());

        let first = store.toggle();
        let second = store.toggle();

        assert_eq!(first.mode(), DisplayMode::Dark);
        assert_eq!(second.mode(), DisplayMode::Light);
        first.await.unwrap();
        second.await.unwrap();
    }

    #[tokio::test]
    async fn should_leave_subscribers_on_current_mode_after_concurrent_toggles() {
        let runtime = Handle::current();
        for _ in 0..500 {
            let store = Arc::new(PreferenceStore::new(InMemoryStore::default()));
            let last_seen = Arc::new(Mutex::new(None));
            let slot = Arc::clone(&last_seen);
            let _sub = store.subscribe(move |mode| *slot.lock().unwrap() = Some(mode));
            let barrier = Arc::new(std::sync::Barrier::new(3));

            let threads: Vec<_> = (0..3)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let barrier = Arc::clone(&barrier);
                    let runtime = runtime.clone();
                    std::thread::spawn(move || {
                        let _guard = runtime.enter();
                        barrier.wait();
                        store.toggle().mode()
                    })
                })
                .collect();
            let mut produced: Vec<DisplayMode> = threads
                .into_iter()
                .map(|thread| thread.join().unwrap())
                .collect();

            assert_eq!(*last_seen.lock().unwrap(), Some(store.current_mode()));
            assert_eq!(store.current_mode(), DisplayMode::Dark);
            produced.sort_by_key(|mode| mode.is_dark());
            assert_eq!(
                produced,
                vec![DisplayMode::Light, DisplayMode::Dark, DisplayMode::Dark]
            );
        }
    }

    #[test]
    fn should_still_activate_after_call_outside_runtime() {
        let store = PreferenceStore::new(InMemoryStore::with_value("true"));

        let outside = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| store.activate()));
        assert!(outside.is_err());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        runtime.block_on(async {
            store.activate().unwrap().await.unwrap();
        });
        assert_eq!(store.current_mode(), DisplayMode::Dark);
    }

    #[tokio::test]
    async fn should_notify_once_per_toggle() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let (count, _sub) = counter(&store);

        for _ in 0..5 {
            let _ = store.toggle();
        }

        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn should_deliver_new_mode_to_every_subscriber_before_returning() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let seen_a = Arc::new(Mutex::new(Vec::new()));
        let seen_b = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::clone(&seen_a);
        let b = Arc::clone(&seen_b);
        let _sa = store.subscribe(move |mode| a.lock().unwrap().push(mode));
        let _sb = store.subscribe(move |mode| b.lock().unwrap().push(mode));

        let write = store.toggle();

        assert_eq!(*seen_a.lock().unwrap(), vec![DisplayMode::Dark]);
        assert_eq!(*seen_b.lock().unwrap(), vec![DisplayMode::Dark]);
        write.await.unwrap();
    }

    #[tokio::test]
    async fn should_let_subscriber_read_store_during_notification() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let handle = store.handle();
        let observed = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&observed);
        let _sub = store.subscribe(move |_| {
            *slot.lock().unwrap() = Some(handle.current_mode());
        });

        store.toggle().await.unwrap();

        assert_eq!(*observed.lock().unwrap(), Some(DisplayMode::Dark));
    }

    #[tokio::test]
    async fn should_stop_notifying_after_unsubscribe() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let (count, sub) = counter(&store);

        store.toggle().await.unwrap();
        sub.unsubscribe();
        store.toggle().await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn should_persist_new_mode_as_json_boolean() {
        let storage = Arc::new(InMemoryStore::default());
        let store = PreferenceStore::new(Arc::clone(&storage));

        store.toggle().await.unwrap();
        assert_eq!(storage.stored().as_deref(), Some("true"));

        store.toggle().await.unwrap();
        assert_eq!(storage.stored().as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn should_keep_flipped_mode_when_write_fails() {
        let storage = InMemoryStore {
            fail_writes: true,
            ..InMemoryStore::default()
        };
        let store = PreferenceStore::new(storage);

        let write = store.toggle();
        assert_eq!(store.current_mode(), DisplayMode::Dark);

        write.await.unwrap();
        assert_eq!(store.current_mode(), DisplayMode::Dark);
    }

    #[tokio::test]
    async fn should_restore_persisted_mode_on_activation() {
        let store = PreferenceStore::new(InMemoryStore::with_value("true"));
        let (count, _sub) = counter(&store);

        store.activate().unwrap().await.unwrap();

        assert_eq!(store.current_mode(), DisplayMode::Dark);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_restore_mode_written_by_previous_process() {
        let storage = Arc::new(InMemoryStore::default());
        {
            let first = PreferenceStore::new(Arc::clone(&storage));
            first.activate().unwrap().await.unwrap();
            first.toggle().await.unwrap();
        }

        let second = PreferenceStore::new(Arc::clone(&storage));
        assert_eq!(second.current_mode(), DisplayMode::Light);
        second.activate().unwrap().await.unwrap();
        assert_eq!(second.current_mode(), DisplayMode::Dark);
    }

    #[tokio::test]
    async fn should_stay_default_when_nothing_persisted() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let (count, _sub) = counter(&store);

        store.activate().unwrap().await.unwrap();

        assert_eq!(store.current_mode(), DisplayMode::Light);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_stay_default_when_persisted_value_is_empty_or_garbage() {
        for raw in ["", "maybe", "\"dark\""] {
            let store = PreferenceStore::new(InMemoryStore::with_value(raw));
            store.activate().unwrap().await.unwrap();
            assert_eq!(store.current_mode(), DisplayMode::Light, "value {raw:?}");
        }
    }

    #[tokio::test]
    async fn should_stay_default_when_read_fails() {
        let storage = InMemoryStore {
            fail_reads: true,
            ..InMemoryStore::with_value("true")
        };
        let store = PreferenceStore::new(storage);

        store.activate().unwrap().await.unwrap();

        assert_eq!(store.current_mode(), DisplayMode::Light);
    }

    #[tokio::test]
    async fn should_read_persisted_value_only_once() {
        let storage = Arc::new(InMemoryStore::with_value("true"));
        let store = PreferenceStore::new(Arc::clone(&storage));

        store.activate().unwrap().await.unwrap();
        assert!(store.activate().is_none());
        assert!(store.activate().is_none());

        assert_eq!(storage.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_ignore_persisted_value_arriving_after_toggle() {
        let storage = Arc::new(SlowStore {
            value: "false",
            release: Notify::new(),
        });
        let store = PreferenceStore::new(Arc::clone(&storage));

        let load = store.activate().unwrap();
        store.toggle().await.unwrap();
        storage.release.notify_one();
        load.await.unwrap();

        assert_eq!(store.current_mode(), DisplayMode::Dark);
    }

    #[tokio::test]
    async fn should_walk_through_light_dark_light_scenario() {
        let store = PreferenceStore::new(InMemoryStore::default());

        store.toggle().await.unwrap();
        assert!(store.current_mode().is_dark());
        assert!(std::ptr::eq(palette::resolve(store.current_mode()), &DARK));

        store.toggle().await.unwrap();
        assert!(!store.current_mode().is_dark());
        assert!(std::ptr::eq(palette::resolve(store.current_mode()), &LIGHT));
    }

    #[tokio::test]
    async fn should_share_state_between_store_and_handles() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let handle = store.handle();
        let (count, _sub) = counter(&store);

        handle.toggle().await.unwrap();

        assert_eq!(store.current_mode(), DisplayMode::Dark);
        assert_eq!(handle.clone().theme().mode, DisplayMode::Dark);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_report_none_when_probing_dropped_store() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let handle = store.handle();
        assert_eq!(handle.try_current_mode(), Some(DisplayMode::Light));

        drop(store);
        assert_eq!(handle.try_current_mode(), None);
    }

    #[test]
    #[should_panic(expected = "preference store accessed outside of its lifetime")]
    fn should_panic_when_handle_outlives_store() {
        let store = PreferenceStore::new(InMemoryStore::default());
        let handle = store.handle();
        drop(store);

        let _ = handle.current_mode();
    }
}
