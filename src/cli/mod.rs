//! CLI module for the update notification settings
//!
//! Inspect the settings page and manage the values it is built from.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::{print_error, OutputFormat};

/// Update notification settings
#[derive(Parser, Debug)]
#[command(name = "updatenotification")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Settings page rendering
    Settings {
        #[command(subcommand)]
        command: commands::settings::SettingsCommands,
    },

    /// System configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Groups and update notification recipients
    Groups {
        #[command(subcommand)]
        command: commands::groups::GroupCommands,
    },

    /// Cached update check result
    Check {
        #[command(subcommand)]
        command: commands::check::CheckCommands,
    },

    /// Diagnostics and debugging
    Diag {
        #[command(subcommand)]
        command: commands::diag::DiagCommands,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    match cli.command {
        Commands::Settings { command } => commands::settings::run(command, format),
        Commands::Config { command } => commands::config::run(command, format, quiet),
        Commands::Groups { command } => commands::groups::run(command, format, quiet),
        Commands::Check { command } => commands::check::run(command, format, quiet),
        Commands::Diag { command } => commands::diag::run(command, format),
    }
}
