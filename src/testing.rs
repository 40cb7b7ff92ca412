//! Test doubles for the collaborator traits.
//!
//! Each double counts its calls so tests can check how often a source was
//! queried, not only what came back.

use std::cell::Cell;
use std::collections::HashMap;

use crate::sources::{
    ChannelAccessor, ConfigStore, DateTimeFormatter, Group, GroupDirectory, SourceError,
    UpdateStateSource,
};
use crate::update_state::UpdateState;

#[derive(Default)]
pub struct FakeConfig {
    app: HashMap<(String, String), String>,
    system: HashMap<String, String>,
    pub app_calls: Cell<usize>,
    pub system_calls: Cell<usize>,
}

impl FakeConfig {
    pub fn with_app(mut self, app: &str, key: &str, value: &str) -> Self {
        self.app
            .insert((app.to_string(), key.to_string()), value.to_string());
        self
    }

    pub fn with_system(mut self, key: &str, value: &str) -> Self {
        self.system.insert(key.to_string(), value.to_string());
        self
    }
}

impl ConfigStore for FakeConfig {
    fn app_value(&self, app: &str, key: &str, default: &str) -> Result<String, SourceError> {
        self.app_calls.set(self.app_calls.get() + 1);
        Ok(self
            .app
            .get(&(app.to_string(), key.to_string()))
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }

    fn system_value(&self, key: &str, default: &str) -> Result<String, SourceError> {
        self.system_calls.set(self.system_calls.get() + 1);
        Ok(self
            .system
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string()))
    }
}

#[derive(Default)]
pub struct FakeUpdates {
    pub state: UpdateState,
    pub calls: Cell<usize>,
}

impl UpdateStateSource for FakeUpdates {
    fn update_state(&self) -> Result<UpdateState, SourceError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.state.clone())
    }
}

#[derive(Default)]
pub struct FakeGroups {
    groups: HashMap<String, Group>,
    pub lookups: Cell<usize>,
}

impl FakeGroups {
    pub fn with_group(mut self, gid: &str, display_name: &str) -> Self {
        self.groups
            .insert(gid.to_string(), Group::new(gid, display_name));
        self
    }
}

impl GroupDirectory for FakeGroups {
    fn get(&self, gid: &str) -> Result<Option<Group>, SourceError> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.groups.get(gid).cloned())
    }
}

/// Returns a fixed string and remembers what it was asked to format
pub struct FakeFormatter {
    pub output: String,
    pub seen: std::cell::RefCell<Vec<String>>,
}

impl FakeFormatter {
    pub fn returning(output: &str) -> Self {
        Self {
            output: output.to_string(),
            seen: Default::default(),
        }
    }
}

impl DateTimeFormatter for FakeFormatter {
    fn format_date_time(&self, raw: &str) -> Result<String, SourceError> {
        self.seen.borrow_mut().push(raw.to_string());
        Ok(self.output.clone())
    }
}

pub struct FakeChannel(pub &'static str);

impl ChannelAccessor for FakeChannel {
    fn current_channel(&self) -> Result<String, SourceError> {
        Ok(self.0.to_string())
    }
}

/// A source that always fails
pub struct Broken;

impl Broken {
    fn err() -> SourceError {
        SourceError::Database(rusqlite::Error::QueryReturnedNoRows)
    }
}

impl ConfigStore for Broken {
    fn app_value(&self, _: &str, _: &str, _: &str) -> Result<String, SourceError> {
        Err(Self::err())
    }

    fn system_value(&self, _: &str, _: &str) -> Result<String, SourceError> {
        Err(Self::err())
    }
}

impl UpdateStateSource for Broken {
    fn update_state(&self) -> Result<UpdateState, SourceError> {
        Err(Self::err())
    }
}

impl GroupDirectory for Broken {
    fn get(&self, _: &str) -> Result<Option<Group>, SourceError> {
        Err(Self::err())
    }
}

impl DateTimeFormatter for Broken {
    fn format_date_time(&self, _: &str) -> Result<String, SourceError> {
        Err(Self::err())
    }
}

impl ChannelAccessor for Broken {
    fn current_channel(&self) -> Result<String, SourceError> {
        Err(Self::err())
    }
}
