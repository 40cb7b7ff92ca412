//! Update notification settings.
//!
//! This module handles:
//! - Assembling the settings payload from the instance's config, the last
//!   update check, the group directory and the channel selection
//! - Wrapping it into the admin form for the `server` and `overview` sections
//!
//! Building the payload only reads; every collaborator failure is returned
//! to the caller as-is.

mod form;
mod notify_groups;

pub use form::{AdminForm, FormParams, FormVariant, TemplateResponse};
pub use notify_groups::NotifyGroupIds;

use serde::Serialize;
use thiserror::Error;

use crate::app_data::updater_data;
use crate::channel::ChannelSet;
use crate::sources::{
    ChannelAccessor, ConfigStore, DateTimeFormatter, GroupDirectory, SourceError,
    UpdateStateSource,
};

/// Errors that can occur while building the settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Stored notify groups are not a list of group ids: {0}")]
    InvalidNotifyGroups(#[source] serde_json::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A group that receives update notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyGroupEntry {
    /// Group id as configured
    pub value: String,
    /// Display name from the group directory
    pub label: String,
}

/// Everything the settings page shows.
///
/// Field order and names are the page's JSON contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsPayload {
    #[serde(rename = "isNewVersionAvailable")]
    pub is_new_version_available: bool,
    #[serde(rename = "isUpdateChecked")]
    pub is_update_checked: bool,
    #[serde(rename = "lastChecked")]
    pub last_checked: String,
    #[serde(rename = "currentChannel")]
    pub current_channel: String,
    pub channels: ChannelSet,
    #[serde(rename = "newVersionString")]
    pub new_version_string: String,
    #[serde(rename = "downloadLink")]
    pub download_link: String,
    #[serde(rename = "updaterEnabled")]
    pub updater_enabled: bool,
    #[serde(rename = "versionIsEol")]
    pub version_is_eol: bool,
    #[serde(rename = "isDefaultUpdateServerURL")]
    pub is_default_update_server_url: bool,
    #[serde(rename = "updateServerURL")]
    pub update_server_url: String,
    #[serde(rename = "notifyGroups")]
    pub notify_groups: Vec<NotifyGroupEntry>,
    #[serde(rename = "withSettings")]
    pub with_settings: bool,
}

impl SettingsPayload {
    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string(self).map_err(SettingsError::Serialize)
    }
}

/// Builds the settings payload from injected sources
#[derive(Clone, Copy)]
pub struct SettingsAggregator<'a> {
    config: &'a dyn ConfigStore,
    updates: &'a dyn UpdateStateSource,
    groups: &'a dyn GroupDirectory,
    formatter: &'a dyn DateTimeFormatter,
    channel: &'a dyn ChannelAccessor,
}

impl<'a> SettingsAggregator<'a> {
    pub fn new(
        config: &'a dyn ConfigStore,
        updates: &'a dyn UpdateStateSource,
        groups: &'a dyn GroupDirectory,
        formatter: &'a dyn DateTimeFormatter,
        channel: &'a dyn ChannelAccessor,
    ) -> Self {
        Self {
            config,
            updates,
            groups,
            formatter,
            channel,
        }
    }

    /// Assemble the payload. `with_settings` is only echoed back.
    pub fn build_settings(&self, with_settings: bool) -> Result<SettingsPayload, SettingsError> {
        let data = updater_data();

        let last_updated_at = self
            .config
            .app_value(&data.apps.core, &data.keys.last_updated_at, "")?;
        let notify_group_ids = self.notify_group_ids()?;

        let default_server_url = data.updater.default_server_url.as_str();
        let update_server_url = self
            .config
            .system_value(&data.keys.server_url, default_server_url)?;
        let is_default_update_server_url = update_server_url == default_server_url;

        let current_channel = self.channel.current_channel()?;
        let channels = ChannelSet::for_current(&current_channel);

        let state = self.updates.update_state()?;

        let last_checked = self.formatter.format_date_time(&last_updated_at)?;
        let notify_groups = self.resolve_groups(&notify_group_ids)?;

        Ok(SettingsPayload {
            is_new_version_available: state.update_available,
            is_update_checked: !last_updated_at.is_empty(),
            last_checked,
            current_channel,
            channels,
            new_version_string: state.update_version,
            download_link: state.download_link,
            updater_enabled: state.updater_enabled,
            version_is_eol: state.version_is_eol,
            is_default_update_server_url,
            update_server_url,
            notify_groups,
            with_settings,
        })
    }

    fn notify_group_ids(&self) -> Result<NotifyGroupIds, SettingsError> {
        let data = updater_data();
        let raw = self.config.app_value(
            &data.apps.updatenotification,
            &data.keys.notify_groups,
            &NotifyGroupIds::default().encode(),
        )?;

        NotifyGroupIds::decode(&raw).map_err(SettingsError::InvalidNotifyGroups)
    }

    /// Look up every configured group, skipping ids the directory no longer knows
    fn resolve_groups(&self, ids: &NotifyGroupIds) -> Result<Vec<NotifyGroupEntry>, SettingsError> {
        let mut entries = Vec::with_capacity(ids.len());

        for gid in ids.iter() {
            match self.groups.get(gid)? {
                Some(group) => entries.push(NotifyGroupEntry {
                    value: gid.to_string(),
                    label: group.display_name().to_string(),
                }),
                None => {
                    tracing::warn!("Notify group {:?} does not exist, skipping", gid);
                }
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Broken, FakeChannel, FakeConfig, FakeFormatter, FakeGroups, FakeUpdates};
    use crate::update_state::UpdateState;

    const DEFAULT_URL: &str = "https://updates.nextcloud.com/updater_server/";

    struct Fixture {
        config: FakeConfig,
        updates: FakeUpdates,
        groups: FakeGroups,
        formatter: FakeFormatter,
        channel: FakeChannel,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: FakeConfig::default()
                    .with_app("core", "lastupdatedat", "12345")
                    .with_app("updatenotification", "notify_groups", r#"["admin"]"#),
                updates: FakeUpdates {
                    state: UpdateState {
                        update_available: true,
                        update_version: "8.1.2".to_string(),
                        download_link: "https://downloads.nextcloud.org/server".to_string(),
                        updater_enabled: true,
                        version_is_eol: false,
                    },
                    ..Default::default()
                },
                groups: FakeGroups::default().with_group("admin", "Administrators"),
                formatter: FakeFormatter::returning("LastCheckedReturnValue"),
                channel: FakeChannel("stable"),
            }
        }

        fn aggregator(&self) -> SettingsAggregator<'_> {
            SettingsAggregator::new(
                &self.config,
                &self.updates,
                &self.groups,
                &self.formatter,
                &self.channel,
            )
        }
    }

    fn expected(with_settings: bool) -> SettingsPayload {
        SettingsPayload {
            is_new_version_available: true,
            is_update_checked: true,
            last_checked: "LastCheckedReturnValue".to_string(),
            current_channel: "stable".to_string(),
            channels: ChannelSet::for_current("stable"),
            new_version_string: "8.1.2".to_string(),
            download_link: "https://downloads.nextcloud.org/server".to_string(),
            updater_enabled: true,
            version_is_eol: false,
            is_default_update_server_url: true,
            update_server_url: DEFAULT_URL.to_string(),
            notify_groups: vec![NotifyGroupEntry {
                value: "admin".to_string(),
                label: "Administrators".to_string(),
            }],
            with_settings,
        }
    }

    #[test]
    fn test_build_with_settings() {
        let fx = Fixture::new();
        let payload = fx.aggregator().build_settings(true).unwrap();
        assert_eq!(payload, expected(true));

        // Each source is asked exactly as often as needed
        assert_eq!(fx.config.app_calls.get(), 2);
        assert_eq!(fx.config.system_calls.get(), 1);
        assert_eq!(fx.updates.calls.get(), 1);
        assert_eq!(fx.groups.lookups.get(), 1);
        assert_eq!(*fx.formatter.seen.borrow(), ["12345"]);
    }

    #[test]
    fn test_build_without_settings() {
        let fx = Fixture::new();
        let payload = fx.aggregator().build_settings(false).unwrap();
        assert_eq!(payload, expected(false));
    }

    #[test]
    fn test_flag_changes_nothing_else() {
        let fx = Fixture::new();
        let with = fx.aggregator().build_settings(true).unwrap();
        let mut without = fx.aggregator().build_settings(false).unwrap();
        assert!(!without.with_settings);
        without.with_settings = true;
        assert_eq!(with, without);
    }

    #[test]
    fn test_json_field_names_and_order() {
        let fx = Fixture::new();
        let json = fx.aggregator().build_settings(true).unwrap().to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"isNewVersionAvailable":true,"isUpdateChecked":true,"#,
                r#""lastChecked":"LastCheckedReturnValue","currentChannel":"stable","#,
                r#""channels":["daily","beta","stable","production"],"#,
                r#""newVersionString":"8.1.2","#,
                r#""downloadLink":"https://downloads.nextcloud.org/server","#,
                r#""updaterEnabled":true,"versionIsEol":false,"#,
                r#""isDefaultUpdateServerURL":true,"#,
                r#""updateServerURL":"https://updates.nextcloud.com/updater_server/","#,
                r#""notifyGroups":[{"value":"admin","label":"Administrators"}],"#,
                r#""withSettings":true}"#
            )
        );
    }

    #[test]
    fn test_idempotent() {
        let fx = Fixture::new();
        let first = fx.aggregator().build_settings(true).unwrap().to_json().unwrap();
        let second = fx.aggregator().build_settings(true).unwrap().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_git_channel() {
        let mut fx = Fixture::new();
        fx.channel = FakeChannel("git");
        let payload = fx.aggregator().build_settings(true).unwrap();
        assert_eq!(payload.current_channel, "git");
        assert_eq!(
            payload.channels.as_slice(),
            ["daily", "beta", "stable", "production", "git"]
        );
    }

    #[test]
    fn test_custom_server_url() {
        let mut fx = Fixture::new();
        fx.config = FakeConfig::default()
            .with_app("core", "lastupdatedat", "12345")
            .with_system("updater.server.url", "https://updates.example.org/");
        let payload = fx.aggregator().build_settings(true).unwrap();
        assert!(!payload.is_default_update_server_url);
        assert_eq!(payload.update_server_url, "https://updates.example.org/");
    }

    #[test]
    fn test_server_url_compared_exactly() {
        let mut fx = Fixture::new();
        // Missing trailing slash is not the default
        fx.config = FakeConfig::default()
            .with_system("updater.server.url", "https://updates.nextcloud.com/updater_server");
        let payload = fx.aggregator().build_settings(true).unwrap();
        assert!(!payload.is_default_update_server_url);
    }

    #[test]
    fn test_never_checked() {
        let mut fx = Fixture::new();
        fx.config = FakeConfig::default().with_app("core", "lastupdatedat", "");
        fx.formatter = FakeFormatter::returning("");
        let payload = fx.aggregator().build_settings(true).unwrap();
        assert!(!payload.is_update_checked);
        assert_eq!(*fx.formatter.seen.borrow(), [""]);
    }

    #[test]
    fn test_default_notify_groups() {
        let mut fx = Fixture::new();
        fx.config = FakeConfig::default();
        let payload = fx.aggregator().build_settings(true).unwrap();
        assert_eq!(payload.notify_groups, expected(true).notify_groups);
    }

    #[test]
    fn test_notify_groups_keep_order_and_skip_unknown() {
        let mut fx = Fixture::new();
        fx.config = FakeConfig::default().with_app(
            "updatenotification",
            "notify_groups",
            r#"["staff","ghost","admin"]"#,
        );
        fx.groups = FakeGroups::default()
            .with_group("admin", "Administrators")
            .with_group("staff", "Staff");

        let payload = fx.aggregator().build_settings(true).unwrap();
        let values: Vec<_> = payload.notify_groups.iter().map(|g| g.value.as_str()).collect();
        let labels: Vec<_> = payload.notify_groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(values, ["staff", "admin"]);
        assert_eq!(labels, ["Staff", "Administrators"]);
        assert_eq!(fx.groups.lookups.get(), 3);
    }

    #[test]
    fn test_malformed_notify_groups() {
        let mut fx = Fixture::new();
        fx.config = FakeConfig::default().with_app("updatenotification", "notify_groups", "admin");
        let err = fx.aggregator().build_settings(true).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidNotifyGroups(_)));
    }

    #[test]
    fn test_source_failures_propagate() {
        let fx = Fixture::new();
        let broken = Broken;

        let aggregators = [
            SettingsAggregator::new(&broken, &fx.updates, &fx.groups, &fx.formatter, &fx.channel),
            SettingsAggregator::new(&fx.config, &broken, &fx.groups, &fx.formatter, &fx.channel),
            SettingsAggregator::new(&fx.config, &fx.updates, &broken, &fx.formatter, &fx.channel),
            SettingsAggregator::new(&fx.config, &fx.updates, &fx.groups, &broken, &fx.channel),
            SettingsAggregator::new(&fx.config, &fx.updates, &fx.groups, &fx.formatter, &broken),
        ];

        for aggregator in aggregators {
            let err = aggregator.build_settings(true).unwrap_err();
            assert!(matches!(err, SettingsError::Source(SourceError::Database(_))));
        }
    }
}
