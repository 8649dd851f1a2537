use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Named notification channel. Topics compare by string equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(Cow<'static, str>);

impl Topic {
    pub const PROFILE_UPDATED: Topic = Topic::from_static("profile-updated");
    pub const STATS_UPDATED: Topic = Topic::from_static("stats-updated");
    pub const EVENTS_UPDATED: Topic = Topic::from_static("events-updated");
    /// Carries a [`crate::DataChanged`] payload.
    pub const DATA_CHANGED: Topic = Topic::from_static("data-changed");

    pub const fn from_static(name: &'static str) -> Self {
        Topic(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Topic {
    fn from(name: &'static str) -> Self {
        Topic::from_static(name)
    }
}

impl From<String> for Topic {
    fn from(name: String) -> Self {
        Topic(Cow::Owned(name))
    }
}
