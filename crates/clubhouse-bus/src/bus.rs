use crate::listener::Listener;
use crate::topic::Topic;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusEvent {
    pub topic: Topic,
    pub payload: serde_json::Value,
}

/// Outcome of one emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitReport {
    /// Listeners that returned `Ok`.
    pub delivered: usize,
    /// Listeners that returned `Err` or panicked.
    pub failed: usize,
}

impl EmitReport {
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed
    }
}

pub trait EventBus: Send + Sync {
    fn subscribe(&self, topic: Topic, listener: Listener);
    fn unsubscribe(&self, topic: &Topic, listener: &Listener);
    fn emit(&self, topic: &Topic, payload: &serde_json::Value) -> EmitReport;
    fn clear_topic(&self, topic: &Topic);

    fn publish(&self, event: &BusEvent) -> EmitReport {
        self.emit(&event.topic, &event.payload)
    }
}
