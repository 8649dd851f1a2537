//! Persistence for client-local records.
//!
//! `KeyValueStore` is the raw string store; `Storage` is the only caller of
//! it and adds the JSON layer and the per-key default table.

mod accessor;
mod file;
mod keys;
mod memory;

pub use accessor::Storage;
pub use file::FileStore;
pub use keys::{DefaultTable, StorageKey};
pub use memory::MemoryStore;

use crate::config::{StorageBackendKind, StorageConfig};
use crate::error::{CoreError, CoreResult};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    async fn get_item(&self, key: &str) -> CoreResult<Option<String>>;

    async fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Removing an absent key succeeds.
    async fn remove_item(&self, key: &str) -> CoreResult<()>;
}

/// Builds the backend named by the storage section of the config.
pub fn open_store(cfg: &StorageConfig) -> CoreResult<Arc<dyn KeyValueStore>> {
    match cfg.backend {
        StorageBackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackendKind::File => {
            let root = cfg.root_dir.clone().ok_or_else(|| {
                CoreError::Config("storage.root_dir is required".to_string())
            })?;
            Ok(Arc::new(FileStore::new(root)))
        }
    }
}
