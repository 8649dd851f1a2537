use super::keys::{DefaultTable, StorageKey};
use super::KeyValueStore;
use crate::error::{format_error_chain, CoreError, CoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// JSON accessor over a `KeyValueStore`.
///
/// Failures are logged here and returned to the caller; nothing is retried.
/// Concurrent writers to one key race and the last write wins.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    defaults: DefaultTable,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>, defaults: DefaultTable) -> Self {
        Self { store, defaults }
    }

    pub fn defaults(&self) -> &DefaultTable {
        &self.defaults
    }

    /// Stored value for `key`, else its default, else `None`.
    pub async fn get(&self, key: StorageKey) -> CoreResult<Option<Value>> {
        let raw = self
            .store
            .get_item(key.as_str())
            .await
            .map_err(|e| log_failure("get", key, e))?;

        match raw {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .map_err(|e| log_failure("get", key, CoreError::from(e)))?;
                tracing::debug!(key = %key, "storage read");
                Ok(Some(value))
            }
            None => {
                let has_default = self.defaults.get(key).is_some();
                tracing::debug!(key = %key, has_default, "storage miss");
                Ok(self.defaults.get(key).cloned())
            }
        }
    }

    /// Typed form of [`Storage::get`]; a value of the wrong shape is an error.
    pub async fn get_as<T: DeserializeOwned>(&self, key: StorageKey) -> CoreResult<Option<T>> {
        match self.get(key).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| log_failure("get", key, CoreError::from(e))),
            None => Ok(None),
        }
    }

    /// Serializes `value` completely before writing, so a value that cannot
    /// be encoded leaves the stored entry untouched.
    pub async fn set<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> CoreResult<()> {
        let encoded =
            serde_json::to_string(value).map_err(|e| log_failure("set", key, CoreError::from(e)))?;
        self.store
            .set_item(key.as_str(), &encoded)
            .await
            .map_err(|e| log_failure("set", key, e))?;
        tracing::debug!(key = %key, bytes = encoded.len(), "storage write");
        Ok(())
    }

    pub async fn remove(&self, key: StorageKey) -> CoreResult<()> {
        self.store
            .remove_item(key.as_str())
            .await
            .map_err(|e| log_failure("remove", key, e))?;
        tracing::debug!(key = %key, "storage remove");
        Ok(())
    }
}

fn log_failure(op: &'static str, key: StorageKey, error: CoreError) -> CoreError {
    let chain = format_error_chain(&error);
    tracing::warn!(op = op, key = %key, error = %chain, "storage operation failed");
    error
}
