//! Configuration schema and loader (file + env merge).

use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    /// Archive settings.
    #[serde(default)]
    pub archives: ArchivesConfig,
    /// Save-game settings.
    #[serde(default)]
    pub saves: SavesConfig,
    /// Run-loop settings.
    #[serde(default)]
    pub run: RunConfig,
}

/// Archives offered to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchivesConfig {
    /// WAD files in load order, IWAD first. Empty means the engine falls
    /// back to its built-in data.
    #[serde(default)]
    pub wads: Vec<PathBuf>,
}

/// Save-game persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavesConfig {
    /// Directory for `doomsav<slot>.dsg` files; saves stay in memory when
    /// unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Run-loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Stop after this many ticks; unset runs until quit or guest exit.
    #[serde(default)]
    pub ticks: Option<u64>,
    /// What a guest exit request does: "record" stops the run, "ignore"
    /// logs it and keeps going.
    #[serde(default = "default_exit_policy")]
    pub exit_policy: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: None,
            exit_policy: default_exit_policy(),
        }
    }
}

fn default_exit_policy() -> String {
    "record".to_string()
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if exists)
/// 3. Environment variables (DOOMBOX_ prefix)
pub fn load_config(config_path: Option<&str>) -> Result<HostConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(HostConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("DOOMBOX_").split("_"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}
