//! Service configuration
//!
//! Loaded once at startup from TOML and never mutated afterwards. Lookup
//! order: `--config` / `FINGERTRAIL_CONFIG`, then
//! `<config dir>/fingertrail/config.toml`. A missing file means defaults.

use anyhow::{Context, Result};
use ft_core::Game;
use journal::StorageConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use watcher::notify::DEFAULT_TOPIC;
use watcher::DetectorConfig;

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub detector: DetectorSection,
    pub server: ServerSection,
    pub notify: NotifySection,
    pub source: SourceSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSection {
    /// Seconds between detector ticks
    pub status_check_interval_secs: u64,
    /// Grace period, in hours, for content status and staleness
    pub content_update_timeout_hours: u64,
    /// Games to track
    pub games: Vec<Game>,
}

impl Default for DetectorSection {
    fn default() -> Self {
        Self {
            status_check_interval_secs: 10,
            content_update_timeout_hours: 2,
            games: Game::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub enabled: bool,
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySection {
    /// Subscriber topic for content update broadcasts
    pub topic: String,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Directory with one `<game-slug>/fingerprint.json` per game
    pub manifest_dir: PathBuf,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            manifest_dir: PathBuf::from("manifests"),
        }
    }
}

impl Config {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let interval = self.detector.status_check_interval_secs;
        if !(1..=3600).contains(&interval) {
            anyhow::bail!("detector.status_check_interval_secs must be 1-3600, got {}", interval);
        }

        let timeout = self.detector.content_update_timeout_hours;
        if !(1..=168).contains(&timeout) {
            anyhow::bail!("detector.content_update_timeout_hours must be 1-168, got {}", timeout);
        }

        if self.detector.games.is_empty() {
            anyhow::bail!("detector.games must list at least one game");
        }

        if self.storage.database.trim().is_empty() {
            anyhow::bail!("storage.database must not be empty");
        }

        if self.notify.topic.trim().is_empty() {
            anyhow::bail!("notify.topic must not be empty");
        }

        Ok(())
    }

    /// Detector tunables derived from this configuration
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            games: self.detector.games.clone(),
            status_check_interval: Duration::from_secs(self.detector.status_check_interval_secs),
            content_update_timeout: Duration::from_secs(
                self.detector.content_update_timeout_hours * 60 * 60,
            ),
        }
    }
}

/// Default location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fingertrail").join("config.toml"))
}

/// Load configuration from `explicit`, or the default location
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let config = if path.exists() {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        parse(&raw).with_context(|| format!("Invalid config file {}", path.display()))?
    } else if explicit.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Config::default()
    };

    config.validate().context("Invalid configuration value")?;
    Ok(config)
}

/// Parse configuration from TOML text
pub fn parse(raw: &str) -> Result<Config> {
    toml::from_str(raw).context("Failed to parse TOML")
}

/// Commented example configuration
pub fn example_config() -> String {
    r#"# Fingertrail configuration

[storage]
# Directory holding the fingerprint journal
path = "data"
# Database name (subdirectory of path)
database = "fingertrail"

[detector]
# Seconds between checks (1-3600)
status_check_interval_secs = 10
# Hours a content update stays flagged, and before silent games turn stale (1-168)
content_update_timeout_hours = 2
games = ["ClashRoyale", "ClashofClans", "BrawlStars", "HayDayPop"]

[server]
enabled = true
bind = "127.0.0.1:8080"

[notify]
topic = "everyone"

[source]
# One <game-slug>/fingerprint.json per game
manifest_dir = "manifests"
"#
    .to_string()
}
