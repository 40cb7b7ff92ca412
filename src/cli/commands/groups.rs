//! Group directory and notification recipient commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use updatenotification::app_data::updater_data;
use updatenotification::db::Database;
use updatenotification::settings::NotifyGroupIds;

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List known groups and whether they are notified
    List,

    /// Create a group or change its display name
    Add {
        /// Group id
        gid: String,

        /// Display name (defaults to the id)
        display_name: Option<String>,
    },

    /// Set the groups notified about new versions (none to clear)
    Notify {
        /// Group ids in display order
        #[arg(num_args = 0..)]
        gids: Vec<String>,
    },
}

#[derive(Serialize)]
struct GroupEntry {
    gid: String,
    display_name: String,
    notified: bool,
}

pub fn run(command: GroupCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        GroupCommands::List => list(format),
        GroupCommands::Add { gid, display_name } => add(&gid, display_name.as_deref(), quiet),
        GroupCommands::Notify { gids } => notify(gids, quiet),
    }
}

fn notify_group_ids(db: &Database) -> Result<NotifyGroupIds> {
    let data = updater_data();
    match db.app_value(&data.apps.updatenotification, &data.keys.notify_groups)? {
        Some(raw) => Ok(NotifyGroupIds::decode(&raw)?),
        None => Ok(NotifyGroupIds::default()),
    }
}

fn list(format: OutputFormat) -> Result<()> {
    let db = Database::open()?;
    let notified = notify_group_ids(&db)?;

    let entries: Vec<GroupEntry> = db
        .list_groups()?
        .into_iter()
        .map(|g| GroupEntry {
            notified: notified.iter().any(|id| id == g.gid()),
            gid: g.gid().to_string(),
            display_name: g.display_name().to_string(),
        })
        .collect();

    print_formatted(&entries, format, |entries| {
        if entries.is_empty() {
            return "No groups".to_string();
        }
        entries
            .iter()
            .map(|e| {
                format!(
                    "{} {} ({})",
                    if e.notified { "*" } else { " " },
                    e.gid,
                    e.display_name
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    });

    Ok(())
}

fn add(gid: &str, display_name: Option<&str>, quiet: bool) -> Result<()> {
    let db = Database::open()?;
    db.upsert_group(gid, display_name.unwrap_or(gid))?;

    print_success(&format!("Saved group {}", gid), quiet);
    Ok(())
}

fn notify(gids: Vec<String>, quiet: bool) -> Result<()> {
    let db = Database::open()?;

    for gid in &gids {
        if db.group(gid)?.is_none() {
            tracing::warn!("Group {} does not exist yet, it will be skipped until created", gid);
        }
    }

    let data = updater_data();
    let ids = NotifyGroupIds::new(gids);
    db.set_app_value(&data.apps.updatenotification, &data.keys.notify_groups, &ids.encode())?;

    print_success(&format!("Notify groups: {}", ids.encode()), quiet);
    Ok(())
}
