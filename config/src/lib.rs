//! Configuration for Matter Lab.
//!
//! Loaded from `~/.matter-lab/config.toml`. Every section and field is
//! optional; a missing file is not an error.
//!
//! ```toml
//! [app]
//! tui = "full"
//! start_station = "liquid"
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//!
//! [timing]
//! siphon_tick_ms = 30
//! warning_ms = 3000
//! completion_delay_ms = 2000
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use matter_types::Station;
use matter_types::ui::UiOptions;

const CONFIG_DIR: &str = ".matter-lab";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct LabConfig {
    pub app: Option<AppConfig>,
    pub timing: Option<TimingConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// "full" (alternate screen) or "inline".
    pub tui: Option<String>,
    /// Station shown at startup: intro, solid, liquid or gas.
    pub start_station: Option<String>,
    /// Use ASCII-only glyphs instead of emoji.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable overlay animations and particle drift.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Timing overrides in milliseconds. Zero values are ignored.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct TimingConfig {
    pub siphon_tick_ms: Option<u64>,
    pub warning_ms: Option<u64>,
    pub completion_delay_ms: Option<u64>,
}

impl TimingConfig {
    /// Returns a field value, dropping zeros with a warning.
    #[must_use]
    pub fn positive(field: &'static str, value: Option<u64>) -> Option<u64> {
        match value {
            Some(0) => {
                tracing::warn!(field, "Ignoring zero timing value in config");
                None
            }
            other => other,
        }
    }
}

impl LabConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    /// Configured start station; unknown names are logged and ignored.
    #[must_use]
    pub fn start_station(&self) -> Option<Station> {
        let raw = self.app.as_ref()?.start_station.as_deref()?;
        match raw.parse() {
            Ok(station) => Some(station),
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        }
    }

    #[must_use]
    pub fn timing(&self) -> TimingConfig {
        self.timing.unwrap_or_default()
    }
}

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR))
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}
