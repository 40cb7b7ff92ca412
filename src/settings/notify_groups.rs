//! The notify-group preference as stored in the app config.

use serde::{Deserialize, Serialize};

use crate::app_data::updater_data;

/// Ids of the groups notified about new versions, in the admin's order.
///
/// Stored as a JSON array of strings under
/// `updatenotification`/`notify_groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotifyGroupIds(Vec<String>);

impl NotifyGroupIds {
    pub fn new(ids: Vec<String>) -> Self {
        Self(ids)
    }

    /// Parse the stored representation
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Representation written to the app config
    pub fn encode(&self) -> String {
        // A list of strings always serializes
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for NotifyGroupIds {
    fn default() -> Self {
        Self(updater_data().notify.default_groups.clone())
    }
}
