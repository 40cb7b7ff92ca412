use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config/data base directory
pub const HOME_ENV: &str = "UPDATENOTIFICATION_DIR";

/// Instance-wide system configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub updater: UpdaterConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Update server and channel selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Custom update server, built-in default when unset
    #[serde(default)]
    pub server_url: Option<String>,
    /// Selected release channel, build channel when unset
    #[serde(default)]
    pub release_channel: Option<String>,
}

/// How timestamps are shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `strftime` pattern for the last-checked time
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Show times in UTC instead of the local time zone
    #[serde(default)]
    pub utc: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            utc: false,
        }
    }
}

fn default_date_format() -> String {
    "%B %-d, %Y %H:%M:%S".to_string()
}

/// Keys accepted by `get`/`set`, in the host's dotted naming
pub const KEYS: &[&str] = &[
    "updater.server.url",
    "updater.release.channel",
    "display.date_format",
    "display.utc",
];

impl Config {
    /// Base directory for config and database
    pub fn base_dir(kind: BaseDir) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let dirs = directories::ProjectDirs::from("com", "updatenotification", "UpdateNotification")
            .ok_or_else(|| anyhow::anyhow!("Could not determine {:?} directory", kind))?;

        Ok(match kind {
            BaseDir::Config => dirs.config_dir().to_path_buf(),
            BaseDir::Data => dirs.data_dir().to_path_buf(),
        })
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = Self::base_dir(BaseDir::Config)?;
        std::fs::create_dir_all(&config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from file, defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Invalid config file {:?}", path))?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Look up a value by dotted key, `None` when unset or unknown
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "updater.server.url" => self.updater.server_url.clone(),
            "updater.release.channel" => self.updater.release_channel.clone(),
            "display.date_format" => Some(self.display.date_format.clone()),
            "display.utc" => Some(self.display.utc.to_string()),
            _ => None,
        }
    }

    /// Set a value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "updater.server.url" => {
                self.updater.server_url = Some(value.to_string());
            }
            "updater.release.channel" => {
                self.updater.release_channel = Some(value.to_string());
            }
            "display.date_format" => {
                self.display.date_format = value.to_string();
            }
            "display.utc" => {
                self.display.utc = value.parse()?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }

        Ok(())
    }

    /// Clear a value so the built-in default applies again
    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "updater.server.url" => self.updater.server_url = None,
            "updater.release.channel" => self.updater.release_channel = None,
            "display.date_format" => self.display.date_format = default_date_format(),
            "display.utc" => self.display.utc = false,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }

        Ok(())
    }
}

/// Which platform directory to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseDir {
    Config,
    Data,
}
