//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/sitenav/sitenav.toml`
//! 3. Local config: `<project_dir>/.sitenav.toml`
//! 4. Environment variables: `SITENAV_*` prefix, `__` between sections
//!    (e.g. `SITENAV_SEARCH__PARALLEL=true`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Search behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    /// Run cascade stages on the rayon thread pool
    pub parallel: bool,
    /// Include entries whose name starts with a dot
    pub include_hidden: bool,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            parallel: false,
            include_hidden: false,
            follow_symlinks: false,
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Print matches relative to the search root
    pub relative_paths: bool,
    /// Colored terminal output (NO_COLOR is honored regardless)
    pub color: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            relative_paths: true,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (all `Option` to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSearchSettings {
    pub parallel: Option<bool>,
    pub include_hidden: Option<bool>,
    pub follow_symlinks: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplaySettings {
    pub relative_paths: Option<bool>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub search: RawSearchSettings,
    pub display: RawDisplaySettings,
}

/// Unified configuration for sitenav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub display: DisplaySettings,
}

/// Get the XDG config directory for sitenav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sitenav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("sitenav.toml"))
}

/// Get the path to the local config file of a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".sitenav.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            search: SearchSettings {
                parallel: overlay.search.parallel.unwrap_or(self.search.parallel),
                include_hidden: overlay
                    .search
                    .include_hidden
                    .unwrap_or(self.search.include_hidden),
                follow_symlinks: overlay
                    .search
                    .follow_symlinks
                    .unwrap_or(self.search.follow_symlinks),
            },
            display: DisplaySettings {
                relative_paths: overlay
                    .display
                    .relative_paths
                    .unwrap_or(self.display.relative_paths),
                color: overlay.display.color.unwrap_or(self.display.color),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.sitenav.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Load a single config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply SITENAV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SITENAV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("search.parallel") {
            settings.search.parallel = val;
        }
        if let Ok(val) = config.get_bool("search.include_hidden") {
            settings.search.include_hidden = val;
        }
        if let Ok(val) = config.get_bool("search.follow_symlinks") {
            settings.search.follow_symlinks = val;
        }
        if let Ok(val) = config.get_bool("display.relative_paths") {
            settings.display.relative_paths = val;
        }
        if let Ok(val) = config.get_bool("display.color") {
            settings.display.color = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
