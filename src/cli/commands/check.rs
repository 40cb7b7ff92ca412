//! Update check result commands
//!
//! The background checker that polls the update server is not part of this
//! tool; these commands store or inspect what it would have cached.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::cli::commands::formatter_for;
use crate::cli::output::{print_formatted, print_success, OutputFormat};
use updatenotification::app_data::updater_data;
use updatenotification::db::Database;
use updatenotification::host::Host;
use updatenotification::sources::{ConfigStore, UpdateStateSource};
use updatenotification::update_state::{parse_check_result, CachedUpdateChecker, UpdateState};

#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Show the cached update check result
    Show,

    /// Store an update server response and mark the check as done now
    Record {
        /// JSON file with the update server response
        file: PathBuf,
    },

    /// Forget the cached result and the last check time
    Clear,
}

#[derive(Serialize)]
struct CheckResult {
    last_checked: Option<String>,
    update_available: bool,
    update_version: String,
    download_link: String,
    updater_enabled: bool,
    version_is_eol: bool,
}

pub fn run(command: CheckCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        CheckCommands::Show => show(format),
        CheckCommands::Record { file } => record(&file, quiet),
        CheckCommands::Clear => clear(quiet),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let data = updater_data();
    let host = Host::open()?;
    let state = CachedUpdateChecker::new(&host).update_state()?;

    let raw = host.app_value(&data.apps.core, &data.keys.last_updated_at, "")?;
    let last_checked = if raw.is_empty() {
        None
    } else {
        Some(formatter_for(host.config()).format_date_time(&raw)?)
    };

    let result = CheckResult {
        last_checked,
        update_available: state.update_available,
        update_version: state.update_version,
        download_link: state.download_link,
        updater_enabled: state.updater_enabled,
        version_is_eol: state.version_is_eol,
    };

    print_formatted(&result, format, |r| {
        let mut lines = vec![format!(
            "Last checked: {}",
            r.last_checked.as_deref().unwrap_or("never")
        )];
        if r.update_available {
            lines.push(format!("Update available: {}", r.update_version));
        } else {
            lines.push("No update available".to_string());
        }
        lines.join("\n")
    });

    Ok(())
}

fn record(file: &Path, quiet: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {:?}", file))?;

    let host = Host::open()?;
    let state = store_check_result(host.db(), &content, chrono::Utc::now().timestamp())
        .with_context(|| format!("Rejected update server response in {:?}", file))?;

    if state.update_available {
        print_success(&format!("Recorded update to {}", state.update_version), quiet);
    } else {
        print_success("Recorded check, no update available", quiet);
    }

    Ok(())
}

/// Validate a server response and cache it with the check time.
///
/// Nothing is written unless the response parses.
fn store_check_result(db: &Database, content: &str, checked_at: i64) -> Result<UpdateState> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Response is not valid JSON")?;

    let is_empty_list = value.as_array().is_some_and(|a| a.is_empty());
    if !value.is_object() && !is_empty_list {
        anyhow::bail!("Update server response must be a JSON object");
    }

    let stored = value.to_string();
    let state = parse_check_result(&stored)?;

    let data = updater_data();
    db.set_app_value(&data.apps.core, &data.keys.last_update_result, &stored)?;
    db.set_app_value(
        &data.apps.core,
        &data.keys.last_updated_at,
        &checked_at.to_string(),
    )?;

    Ok(state)
}

fn clear(quiet: bool) -> Result<()> {
    let data = updater_data();
    let host = Host::open()?;
    host.db()
        .delete_app_value(&data.apps.core, &data.keys.last_update_result)?;
    host.db()
        .delete_app_value(&data.apps.core, &data.keys.last_updated_at)?;

    print_success("Cleared cached update check", quiet);
    Ok(())
}
