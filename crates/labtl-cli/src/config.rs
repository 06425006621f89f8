//! Configuration file for the `labtl` command.
//!
//! Read from `--config <PATH>` or from the platform config folder:
//! - macOS: ~/Library/Application Support/org.labtl.labtl/
//! - Windows: %APPDATA%/labtl/labtl/config/
//! - Linux: ~/.config/labtl/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use labtl_layout::{DEFAULT_DELIMITER, Granularity, LayoutOptions, TimeFormat};
use labtl_render::RenderOptions;
use labtl_scroll::{DEFAULT_INTERVAL_MS, clamp_interval};

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "labtl";
const APP_NAME: &str = "labtl";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub time: TimeSection,
    pub hierarchy: HierarchySection,
    pub scroll: ScrollSection,
    pub render: RenderOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSection {
    pub granularity: Granularity,
    /// Header label formats, strftime syntax.
    pub labels: TimeFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchySection {
    /// Separator between flat name segments.
    pub delimiter: char,
}

impl Default for HierarchySection {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSection {
    pub throttle_ms: u64,
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            throttle_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl ScrollSection {
    /// Throttle interval, clamped to the supported range.
    pub fn interval(&self) -> Duration {
        clamp_interval(Duration::from_millis(self.throttle_ms))
    }
}

impl TimelineConfig {
    /// # Errors
    ///
    /// Returns the TOML parse error.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            granularity: self.time.granularity,
            delimiter: self.hierarchy.delimiter,
            time_format: self.time.labels.clone(),
        }
    }
}

/// Location of the config file in the platform config folder.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load the configuration.
///
/// An explicit `path` must be readable. The platform file is optional. A
/// file that does not parse is reported and defaults are used instead.
///
/// # Errors
///
/// Fails when an explicit `path` cannot be read.
pub fn load_config(path: Option<&Path>) -> Result<TimelineConfig> {
    if let Some(path) = path {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        return Ok(parse_or_default(&content, path));
    }

    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config path, using defaults");
        return Ok(TimelineConfig::default());
    };
    match fs::read_to_string(&path) {
        Ok(content) => Ok(parse_or_default(&content, &path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(TimelineConfig::default())
        }
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            Ok(TimelineConfig::default())
        }
    }
}

fn parse_or_default(content: &str, path: &Path) -> TimelineConfig {
    match TimelineConfig::from_toml_str(content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::warn!("Failed to parse config file: {}, using defaults", e);
            TimelineConfig::default()
        }
    }
}
