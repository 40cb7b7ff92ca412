//! SQLite storage for per-app configuration and the group directory.
//!
//! Two tables mirror what the host keeps in its database:
//!
//! - `appconfig`: `(appid, configkey) -> configvalue`, e.g. the last update
//!   check time under `core`/`lastupdatedat`
//! - `groups`: group ids and their display names
//!
//! The database is stored next to the config under the platform data dir
//! (or `$UPDATENOTIFICATION_DIR`).

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

use crate::config::{BaseDir, Config};
use crate::sources::Group;

/// Database manager for app config values and groups
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get the database file path
    pub fn db_path() -> Result<PathBuf> {
        let data_dir = Config::base_dir(BaseDir::Data)?;
        std::fs::create_dir_all(&data_dir)?;

        Ok(data_dir.join("updatenotification.db"))
    }

    /// Open or create the database at the default location
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::db_path()?)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        let db = Self { conn };
        db.init_schema()?;

        tracing::info!("Opened database at {:?}", path);
        Ok(db)
    }

    /// Throwaway database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS appconfig (
                appid TEXT NOT NULL,
                configkey TEXT NOT NULL,
                configvalue TEXT,
                PRIMARY KEY (appid, configkey)
            );

            CREATE TABLE IF NOT EXISTS groups (
                gid TEXT PRIMARY KEY,
                displayname TEXT NOT NULL DEFAULT ''
            );
            ",
        )?;
        Ok(())
    }

    /// Look up an app config value
    pub fn app_value(&self, app: &str, key: &str) -> rusqlite::Result<Option<String>> {
        tracing::debug!("Reading app config {}/{}", app, key);
        self.conn
            .query_row(
                "SELECT configvalue FROM appconfig WHERE appid = ? AND configkey = ?",
                params![app, key],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()
            .map(Option::flatten)
    }

    /// Store an app config value, replacing any previous one
    pub fn set_app_value(&self, app: &str, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO appconfig (appid, configkey, configvalue) VALUES (?, ?, ?)",
            params![app, key, value],
        )?;
        tracing::info!("Set app config {}/{}", app, key);
        Ok(())
    }

    /// Remove an app config value, returns whether it existed
    pub fn delete_app_value(&self, app: &str, key: &str) -> Result<bool> {
        let count = self.conn.execute(
            "DELETE FROM appconfig WHERE appid = ? AND configkey = ?",
            params![app, key],
        )?;
        Ok(count > 0)
    }

    /// Look up a group by id.
    ///
    /// A group without a display name is shown by its id.
    pub fn group(&self, gid: &str) -> rusqlite::Result<Option<Group>> {
        self.conn
            .query_row(
                "SELECT gid, COALESCE(NULLIF(displayname, ''), gid) FROM groups WHERE gid = ?",
                params![gid],
                |row| Ok(Group::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
    }

    /// Create a group or rename an existing one
    pub fn upsert_group(&self, gid: &str, display_name: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO groups (gid, displayname) VALUES (?, ?)
             ON CONFLICT(gid) DO UPDATE SET displayname = excluded.displayname",
            params![gid, display_name],
        )?;
        tracing::info!("Saved group {}", gid);
        Ok(())
    }

    /// All groups ordered by id
    pub fn list_groups(&self) -> Result<Vec<Group>> {
        let mut stmt = self.conn.prepare(
            "SELECT gid, COALESCE(NULLIF(displayname, ''), gid) FROM groups ORDER BY gid",
        )?;

        let groups = stmt
            .query_map([], |row| {
                Ok(Group::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(groups)
    }
}
