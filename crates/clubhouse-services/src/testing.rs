//! Shared fixtures for service tests.

use crate::context::AppContext;
use async_trait::async_trait;
use clubhouse_bus::{ListenerRegistry, Topic};
use clubhouse_core::{
    CoreConfig, CoreError, CoreResult, DefaultTable, KeyValueStore, MemoryStore, Storage,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Memory store whose writes to selected keys fail.
#[derive(Default)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    broken: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub(crate) fn break_writes(&self, key: &str) {
        self.broken.lock().unwrap().insert(key.to_string());
    }

    fn is_broken(&self, key: &str) -> bool {
        self.broken.lock().unwrap().contains(key)
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        if self.is_broken(key) {
            return Err(CoreError::Storage(format!("write to {key} refused")));
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> CoreResult<()> {
        if self.is_broken(key) {
            return Err(CoreError::Storage(format!("remove of {key} refused")));
        }
        self.inner.remove_item(key).await
    }
}

pub(crate) fn flaky_context() -> (Arc<FlakyStore>, AppContext) {
    let store = Arc::new(FlakyStore::default());
    let storage = Storage::new(store.clone(), DefaultTable::standard().unwrap());
    let ctx = AppContext::new(
        CoreConfig::default(),
        storage,
        Arc::new(ListenerRegistry::new()),
    );
    (store, ctx)
}

/// Counts emissions on every topic the services publish to.
pub(crate) fn count_emissions(ctx: &AppContext) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    for topic in [
        Topic::PROFILE_UPDATED,
        Topic::STATS_UPDATED,
        Topic::EVENTS_UPDATED,
        Topic::DATA_CHANGED,
    ] {
        let counter = hits.clone();
        ctx.bus().subscribe_fn(topic, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }
    hits
}
