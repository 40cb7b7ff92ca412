//! Diagnostic and debugging commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, OutputFormat};
use updatenotification::config::{Config, HOME_ENV};
use updatenotification::db::Database;

#[derive(Subcommand, Debug)]
pub enum DiagCommands {
    /// Show all data paths (config, database)
    Paths,
}

#[derive(Serialize)]
struct PathsResult {
    config_file: String,
    database: String,
    overridden: bool,
}

pub fn run(command: DiagCommands, format: OutputFormat) -> Result<()> {
    match command {
        DiagCommands::Paths => paths(format),
    }
}

fn paths(format: OutputFormat) -> Result<()> {
    let result = PathsResult {
        config_file: Config::config_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "<error>".to_string()),
        database: Database::db_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "<error>".to_string()),
        overridden: std::env::var_os(HOME_ENV).is_some(),
    };

    print_formatted(&result, format, |r| {
        let mut lines = vec![
            format!("Config file:  {}", r.config_file),
            format!("Database:     {}", r.database),
        ];
        if r.overridden {
            lines.push(format!("(from ${})", HOME_ENV));
        }
        lines.join("\n")
    });

    Ok(())
}
