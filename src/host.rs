//! Production collaborators backed by the database and the system config.

use crate::app_data::updater_data;
use crate::config::Config;
use crate::db::Database;
use crate::sources::{ChannelAccessor, ConfigStore, Group, GroupDirectory, SourceError};

/// A server instance as seen by the settings page
pub struct Host {
    db: Database,
    config: Config,
}

impl Host {
    pub fn new(db: Database, config: Config) -> Self {
        Self { db, config }
    }

    /// Open the database and config at their default locations
    pub fn open() -> anyhow::Result<Self> {
        Ok(Self::new(Database::open()?, Config::load()?))
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl ConfigStore for Host {
    fn app_value(&self, app: &str, key: &str, default: &str) -> Result<String, SourceError> {
        Ok(self
            .db
            .app_value(app, key)?
            .unwrap_or_else(|| default.to_string()))
    }

    fn system_value(&self, key: &str, default: &str) -> Result<String, SourceError> {
        Ok(self.config.get(key).unwrap_or_else(|| default.to_string()))
    }
}

impl GroupDirectory for Host {
    fn get(&self, gid: &str) -> Result<Option<Group>, SourceError> {
        Ok(self.db.group(gid)?)
    }
}

impl ChannelAccessor for Host {
    fn current_channel(&self) -> Result<String, SourceError> {
        let data = updater_data();
        self.system_value(&data.keys.release_channel, &data.updater.build_channel)
    }
}
