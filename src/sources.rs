//! Read interfaces of the collaborators the settings are assembled from.
//!
//! Each trait is deliberately narrow: the aggregator only ever reads, so no
//! trait exposes a write. Production implementations live in `host.rs`,
//! `update_state.rs` and `datetime.rs`.

use thiserror::Error;

use crate::update_state::UpdateState;

/// Errors raised by a collaborator while answering a query
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Invalid date format: {0:?}")]
    InvalidDateFormat(String),

    #[error("Malformed update check result: {0}")]
    MalformedCheckResult(#[from] serde_json::Error),
}

/// Key/value configuration of the instance
pub trait ConfigStore {
    /// Per-app value, `default` when unset
    fn app_value(&self, app: &str, key: &str, default: &str) -> Result<String, SourceError>;

    /// Instance-wide value, `default` when unset
    fn system_value(&self, key: &str, default: &str) -> Result<String, SourceError>;
}

/// Result of the most recent update check
pub trait UpdateStateSource {
    fn update_state(&self) -> Result<UpdateState, SourceError>;
}

/// A group known to the group directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    gid: String,
    display_name: String,
}

impl Group {
    pub fn new(gid: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            display_name: display_name.into(),
        }
    }

    pub fn gid(&self) -> &str {
        &self.gid
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Lookup of groups by id
pub trait GroupDirectory {
    /// `Ok(None)` when no group with this id exists
    fn get(&self, gid: &str) -> Result<Option<Group>, SourceError>;
}

/// Turns a raw stored timestamp into display text
pub trait DateTimeFormatter {
    fn format_date_time(&self, raw: &str) -> Result<String, SourceError>;
}

/// Release channel the instance is following
pub trait ChannelAccessor {
    fn current_channel(&self) -> Result<String, SourceError>;
}
