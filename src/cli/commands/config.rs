//! System configuration commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use updatenotification::app_data::updater_data;
use updatenotification::channel::ChannelSet;
use updatenotification::config::{Config, KEYS};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "updater.server.url", "updater.release.channel")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "updater.server.url", "updater.release.channel")
        key: String,

        /// Value to set
        value: String,
    },

    /// Reset a config value to its default
    Unset {
        /// Config key
        key: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

#[derive(Serialize)]
struct ConfigValue<'a> {
    key: &'a str,
    value: Option<String>,
}

pub fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Unset { key } => unset(&key, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    if !KEYS.contains(&key) {
        anyhow::bail!("Unknown config key: {} (known: {})", key, KEYS.join(", "));
    }

    let config = Config::load()?;
    let result = ConfigValue {
        key,
        value: config.get(key),
    };

    print_formatted(&result, format, |r| {
        r.value.clone().unwrap_or_else(|| "<not set>".to_string())
    });

    Ok(())
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    config.set(key, value)?;
    config.save()?;

    if let Some(warning) = channel_warning(key, value) {
        tracing::warn!("{}", warning);
    }

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

/// Warn when the selected channel is not one the settings page offers
fn channel_warning(key: &str, value: &str) -> Option<String> {
    if key != updater_data().keys.release_channel {
        return None;
    }

    let channels = ChannelSet::for_current(value);
    if channels.contains(value) {
        None
    } else {
        Some(format!(
            "Channel {:?} is not offered on the settings page (available: {})",
            value,
            channels.as_slice().join(", ")
        ))
    }
}

fn unset(key: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    config.unset(key)?;
    config.save()?;

    print_success(&format!("Reset {}", key), quiet);
    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_warning() {
        assert!(channel_warning("updater.release.channel", "beta").is_none());
        assert!(channel_warning("updater.release.channel", "git").is_none());

        let warning = channel_warning("updater.release.channel", "nightly").unwrap();
        assert!(warning.contains("\"nightly\""));
        assert!(warning.contains("daily, beta, stable, production"));
    }

    #[test]
    fn test_channel_warning_other_keys() {
        assert!(channel_warning("updater.server.url", "nightly").is_none());
    }
}
