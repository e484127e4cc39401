// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::OverwritePolicy;
use crate::ports::*;

/// Environment variables recognised as configuration overrides
pub const ENV_FFMPEG: &str = "FRAMECUT_FFMPEG";
pub const ENV_FFPROBE: &str = "FRAMECUT_FFPROBE";
pub const ENV_LOG: &str = "FRAMECUT_LOG";
pub const ENV_OVERWRITE: &str = "FRAMECUT_OVERWRITE";

/// TOML configuration adapter
#[derive(Debug, Clone, Default)]
pub struct TomlConfigAdapter {
    settings: Settings,
    source: Option<PathBuf>,
}

impl TomlConfigAdapter {
    /// Adapter holding the given settings
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            source: None,
        }
    }

    /// Load from `explicit` if given (it must exist), otherwise from the first
    /// default location that exists, otherwise use defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, DomainError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(DomainError::Config(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Some(path.to_path_buf())
            }
            None => Self::default_config_paths().into_iter().find(|p| p.exists()),
        };

        let settings = match &path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    DomainError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::parse(&content)?
            }
            None => Settings::default(),
        };

        Ok(Self {
            settings,
            source: path,
        })
    }

    /// Parse settings from TOML text
    pub fn parse(toml_content: &str) -> Result<Settings, DomainError> {
        toml::from_str(toml_content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Candidate config files, in lookup order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("framecut.toml")];

        let config_home = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from));
        if let Some(dir) = config_home {
            paths.push(dir.join("framecut").join("config.toml"));
        }

        paths
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ffmpeg) = lookup(ENV_FFMPEG) {
            self.settings.engine.ffmpeg = ffmpeg;
        }
        if let Some(ffprobe) = lookup(ENV_FFPROBE) {
            self.settings.engine.ffprobe = ffprobe;
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.settings.logging.level = level;
        }
        if let Some(policy) = lookup(ENV_OVERWRITE) {
            self.settings.output.overwrite = policy.parse::<OverwritePolicy>()?;
        }
        Ok(())
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// File the settings were read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl ConfigPort for TomlConfigAdapter {
    fn settings(&self) -> &Settings {
        &self.settings
    }
}
