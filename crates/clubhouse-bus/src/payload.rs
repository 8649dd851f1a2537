use clubhouse_core::StorageKey;
use serde::{Deserialize, Serialize};

/// Payload of [`crate::Topic::DATA_CHANGED`]: which record changed and its
/// new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataChanged {
    pub key: StorageKey,
    pub value: serde_json::Value,
}
