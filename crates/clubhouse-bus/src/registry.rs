use crate::bus::{EmitReport, EventBus};
use crate::listener::Listener;
use crate::topic::Topic;
use clubhouse_core::CoreResult;
use serde::Serialize;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-process topic registry.
///
/// Listeners run synchronously on the emitting thread, in registration order.
/// The same listener may be registered more than once and then runs once per
/// registration. A listener that errors or panics is logged and skipped; the
/// remaining listeners still run.
#[derive(Default)]
pub struct ListenerRegistry {
    topics: Mutex<HashMap<Topic, Vec<Listener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn topics(&self) -> MutexGuard<'_, HashMap<Topic, Vec<Listener>>> {
        self.topics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a closure and hands back the handle needed to unsubscribe it.
    pub fn subscribe_fn<F>(&self, topic: Topic, f: F) -> Listener
    where
        F: Fn(&serde_json::Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let listener = Listener::new(f);
        self.subscribe(topic, listener.clone());
        listener
    }

    /// Serializes `payload` then emits it. Nothing runs if encoding fails.
    pub fn emit_json<T: Serialize + ?Sized>(
        &self,
        topic: &Topic,
        payload: &T,
    ) -> CoreResult<EmitReport> {
        let value = serde_json::to_value(payload)?;
        Ok(self.emit(topic, &value))
    }

    pub fn listener_count(&self, topic: &Topic) -> usize {
        self.topics().get(topic).map_or(0, Vec::len)
    }

    pub fn topic_names(&self) -> Vec<Topic> {
        self.topics().keys().cloned().collect()
    }
}

impl EventBus for ListenerRegistry {
    fn subscribe(&self, topic: Topic, listener: Listener) {
        tracing::debug!(topic = %topic, "listener subscribed");
        self.topics().entry(topic).or_default().push(listener);
    }

    fn unsubscribe(&self, topic: &Topic, listener: &Listener) {
        let mut topics = self.topics();
        if let Some(listeners) = topics.get_mut(topic) {
            let before = listeners.len();
            listeners.retain(|l| !l.same_as(listener));
            let removed = before - listeners.len();
            tracing::debug!(topic = %topic, removed, "listener unsubscribed");
            if listeners.is_empty() {
                topics.remove(topic);
            }
        }
    }

    fn emit(&self, topic: &Topic, payload: &serde_json::Value) -> EmitReport {
        // snapshot so listeners may (un)subscribe without deadlocking
        let listeners = match self.topics().get(topic) {
            Some(listeners) => listeners.clone(),
            None => return EmitReport::default(),
        };

        let mut report = EmitReport::default();
        for (index, listener) in listeners.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| listener.call(payload))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    report.failed += 1;
                    let error = format!("{e:#}");
                    tracing::warn!(topic = %topic, index = index, error = %error, "listener failed");
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(topic = %topic, index = index, "listener panicked");
                }
            }
        }
        tracing::debug!(
            topic = %topic,
            delivered = report.delivered,
            failed = report.failed,
            "emitted"
        );
        report
    }

    fn clear_topic(&self, topic: &Topic) {
        if self.topics().remove(topic).is_some() {
            tracing::debug!(topic = %topic, "topic cleared");
        }
    }
}
