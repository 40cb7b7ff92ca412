//! Update check state.
//!
//! `UpdateState` is the snapshot the settings page shows. `CachedUpdateChecker`
//! derives it from the version-check result the host caches in its app config,
//! so reading it never touches the network.

use serde::Deserialize;

use crate::app_data::updater_data;
use crate::sources::{ConfigStore, SourceError, UpdateStateSource};

/// Snapshot of the most recent update check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateState {
    pub update_available: bool,
    /// Empty when no update is available
    pub update_version: String,
    /// Empty when the update server sent no usable link
    pub download_link: String,
    pub updater_enabled: bool,
    pub version_is_eol: bool,
}

/// Raw answer of the update server as cached by the background checker.
///
/// Every field is a string on the wire, flags included ("1"/"0").
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CheckResult {
    version: String,
    versionstring: String,
    url: String,
    autoupdater: String,
    eol: String,
}

impl CheckResult {
    fn into_state(self) -> UpdateState {
        if self.version.is_empty() {
            return UpdateState::default();
        }

        UpdateState {
            update_available: true,
            update_version: self.versionstring,
            download_link: if is_https(&self.url) {
                self.url
            } else {
                tracing::debug!("Ignoring non-https download link {:?}", self.url);
                String::new()
            },
            updater_enabled: self.autoupdater == "1",
            version_is_eol: self.eol == "1",
        }
    }
}

fn is_https(link: &str) -> bool {
    link.starts_with("https://")
}

/// Parse a stored or freshly received update server response
pub fn parse_check_result(raw: &str) -> Result<UpdateState, SourceError> {
    // The checker stores an empty list when the server had nothing to offer
    let raw = raw.trim();
    if raw.is_empty() || raw == "[]" {
        return Ok(UpdateState::default());
    }

    let result: CheckResult = serde_json::from_str(raw)?;
    Ok(result.into_state())
}

/// Reads the cached version-check result from the app config
pub struct CachedUpdateChecker<'a> {
    config: &'a dyn ConfigStore,
}

impl<'a> CachedUpdateChecker<'a> {
    pub fn new(config: &'a dyn ConfigStore) -> Self {
        Self { config }
    }
}

impl UpdateStateSource for CachedUpdateChecker<'_> {
    fn update_state(&self) -> Result<UpdateState, SourceError> {
        let data = updater_data();
        let raw = self
            .config
            .app_value(&data.apps.core, &data.keys.last_update_result, "")?;

        if raw.trim().is_empty() {
            tracing::debug!("No cached update check result");
        }

        parse_check_result(&raw)
    }
}
