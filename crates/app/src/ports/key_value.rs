//! Key-value storage port — small string values persisted on the device.

use std::future::Future;
use std::sync::Arc;

use tidydo_domain::error::TidyError;

/// Asynchronous string key-value storage.
///
/// `set` fully overwrites the previous value of `key`.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, TidyError>> + Send;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), TidyError>> + Send;
}

impl<T: KeyValueStore + Send + Sync> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, TidyError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), TidyError>> + Send {
        (**self).set(key, value)
    }
}
