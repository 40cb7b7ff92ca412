//! Application data embedded from TOML at compile time.
//!
//! This module provides access to constants that are:
//! - Embedded at compile time via `include_str!`
//! - Parsed lazily on first access via `OnceLock`
//! - Immutable at runtime (not admin-configurable)
//!
//! This is distinct from `config.rs` which handles the instance's system
//! configuration. App data defines *how the host behaves* (config keys,
//! default update server, known release channels), while config holds
//! *admin choices* (custom server URL, selected channel).
//!
//! Data lives in `embedded/updater.toml`.

use serde::Deserialize;
use std::sync::OnceLock;

const UPDATER_TOML: &str = include_str!("../embedded/updater.toml");

/// Built-in updater data
#[derive(Debug, Deserialize)]
pub struct UpdaterData {
    pub apps: AppIds,
    pub keys: ConfigKeys,
    pub updater: UpdaterDefaults,
    pub channels: ChannelsData,
    pub notify: NotifyDefaults,
    pub form: FormData,
}

/// App namespaces used for app config lookups
#[derive(Debug, Deserialize)]
pub struct AppIds {
    pub core: String,
    pub updatenotification: String,
}

/// Config keys read from the app and system config
#[derive(Debug, Deserialize)]
pub struct ConfigKeys {
    pub last_updated_at: String,
    pub last_update_result: String,
    pub notify_groups: String,
    pub server_url: String,
    pub release_channel: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdaterDefaults {
    /// Update server used when no custom URL is configured
    pub default_server_url: String,
    /// Channel this build was released on
    pub build_channel: String,
}

#[derive(Debug, Deserialize)]
pub struct ChannelsData {
    /// Selectable channels in display order
    pub known: Vec<String>,
    /// Channel of development checkouts, only listed when active
    pub development: String,
}

#[derive(Debug, Deserialize)]
pub struct NotifyDefaults {
    pub default_groups: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FormData {
    pub template: String,
}

/// Get updater data (lazy-loaded)
pub fn updater_data() -> &'static UpdaterData {
    static DATA: OnceLock<UpdaterData> = OnceLock::new();
    DATA.get_or_init(|| {
        toml::from_str(UPDATER_TOML).unwrap_or_else(|e| {
            panic!("Failed to parse updater.toml: {}", e);
        })
    })
}
