use clubhouse_bus::{DataChanged, ListenerRegistry, Topic};
use clubhouse_core::{
    open_store, CoreConfig, CoreResult, DefaultTable, MemoryStore, Storage, StorageKey,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Storage accessor, event bus and config shared by every service.
///
/// Built once by the host and handed to services by reference; cloning
/// shares the same store and registry.
#[derive(Clone)]
pub struct AppContext {
    config: Arc<CoreConfig>,
    storage: Storage,
    bus: Arc<ListenerRegistry>,
}

impl AppContext {
    pub fn new(config: CoreConfig, storage: Storage, bus: Arc<ListenerRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            storage,
            bus,
        }
    }

    pub fn from_config(config: CoreConfig) -> CoreResult<Self> {
        config.validate()?;
        let store = open_store(&config.storage)?;
        let storage = Storage::new(store, DefaultTable::standard()?);
        tracing::info!(backend = ?config.storage.backend, "app context ready");
        Ok(Self::new(config, storage, Arc::new(ListenerRegistry::new())))
    }

    pub fn in_memory() -> CoreResult<Self> {
        let storage = Storage::new(Arc::new(MemoryStore::new()), DefaultTable::standard()?);
        Ok(Self::new(
            CoreConfig::default(),
            storage,
            Arc::new(ListenerRegistry::new()),
        ))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn bus(&self) -> &Arc<ListenerRegistry> {
        &self.bus
    }

    /// Read for display: absence and read failures both fall back. The
    /// accessor has already logged any failure.
    pub(crate) async fn load_or<T, F>(&self, key: StorageKey, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.storage.get_as(key).await {
            Ok(Some(value)) => value,
            Ok(None) | Err(_) => fallback(),
        }
    }

    /// Persists `value`, then announces it on `topic` (if any) and on
    /// `data-changed`. Nothing is emitted when the write fails.
    pub(crate) async fn persist_and_notify<T: Serialize>(
        &self,
        key: StorageKey,
        topic: Option<&Topic>,
        value: &T,
    ) -> CoreResult<()> {
        let value = serde_json::to_value(value)?;
        self.storage.set(key, &value).await?;
        if let Some(topic) = topic {
            self.bus.emit_json(topic, &value)?;
        }
        self.bus.emit_json(&Topic::DATA_CHANGED, &DataChanged { key, value })?;
        Ok(())
    }
}
