use crate::error::{CoreError, CoreResult};
use crate::seed;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Every record the client persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKey {
    UserProfile,
    UserStats,
    UserEvents,
    PartnerRequests,
    #[serde(rename = "checkin_history")]
    CheckInHistory,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::UserProfile,
        StorageKey::UserStats,
        StorageKey::UserEvents,
        StorageKey::PartnerRequests,
        StorageKey::CheckInHistory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::UserProfile => "user_profile",
            StorageKey::UserStats => "user_stats",
            StorageKey::UserEvents => "user_events",
            StorageKey::PartnerRequests => "partner_requests",
            StorageKey::CheckInHistory => "checkin_history",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CoreError::NotFound(format!("unknown storage key {s:?}")))
    }
}

/// Value returned by `Storage::get` for a key that has never been written.
#[derive(Debug, Clone, Default)]
pub struct DefaultTable {
    entries: HashMap<StorageKey, Value>,
}

impl DefaultTable {
    /// No defaults: every unwritten key reads as absent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The seed event list under `UserEvents`, nothing else.
    pub fn standard() -> CoreResult<Self> {
        let events = serde_json::to_value(seed::initial_events())?;
        Ok(Self::empty().with_default(StorageKey::UserEvents, events))
    }

    pub fn with_default(mut self, key: StorageKey, value: Value) -> Self {
        self.entries.insert(key, value);
        self
    }

    pub fn without_default(mut self, key: StorageKey) -> Self {
        self.entries.remove(&key);
        self
    }

    pub fn get(&self, key: StorageKey) -> Option<&Value> {
        self.entries.get(&key)
    }
}
