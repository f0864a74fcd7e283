use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::rendering::{QuadConfig, ShaderPaths, WindowConfig};
use crate::render::AnimationSettings;

/// File looked up in the working directory by the demo binaries.
pub const DEFAULT_CONFIG_FILE: &str = "quads.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub log_level: LevelFilter,
    pub window: WindowConfig,
    pub shaders: ShaderPaths,
    pub quads: QuadConfig,
    pub animation: AnimationSettings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            window: WindowConfig::default(),
            shaders: ShaderPaths::default(),
            quads: QuadConfig::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path` if it exists. A missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
