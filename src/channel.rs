//! Release channels offered on the settings page.

use serde::Serialize;

use crate::app_data::updater_data;

/// Channels shown to the admin, in display order.
///
/// The development channel is only listed while the instance is on it,
/// since it cannot be switched to from a packaged release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChannelSet(Vec<String>);

impl ChannelSet {
    /// Build the channel list for an instance currently on `current`
    pub fn for_current(current: &str) -> Self {
        let data = &updater_data().channels;
        let mut channels = data.known.clone();
        if current == data.development {
            channels.push(data.development.clone());
        }
        Self(channels)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.0.iter().any(|c| c == channel)
    }
}
