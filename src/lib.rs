//! Update notification settings for a self-hosted server instance.
//!
//! The settings page shows which release channel the instance follows,
//! whether a newer version was found by the last update check, and which
//! groups get notified about it. [`settings::SettingsAggregator`] gathers
//! all of that from narrow read-only sources (see [`sources`]), and
//! [`settings::AdminForm`] wraps it for the `server` and `overview`
//! sections of the admin settings.

pub mod app_data;
pub mod channel;
pub mod config;
pub mod datetime;
pub mod db;
pub mod host;
pub mod settings;
pub mod sources;
pub mod update_state;

#[cfg(test)]
mod testing;
