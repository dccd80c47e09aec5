//! Configuration management for persistent storage of user settings

use crate::session::DataPaths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("Configuration key '{key}' not found")]
    KeyNotFound { key: String },
    #[error("Invalid value '{value}' for configuration key '{key}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LecternConfig {
    /// Built-in configuration values
    #[serde(flatten)]
    pub defaults: DefaultConfig,
    /// User-defined custom configuration values
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultConfig {
    pub data_dir: String,
    pub courses_file: String,
    pub enrollments_file: String,
    pub content_file: String,
    pub color_output: bool,
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            courses_file: "courses.db".to_string(),
            enrollments_file: "enrollments.db".to_string(),
            content_file: "content.txt".to_string(),
            color_output: true,
        }
    }
}

impl LecternConfig {
    /// Resolve the three data file paths, with an optional data directory
    /// taking precedence over `data_dir`.
    pub fn data_paths(&self, data_dir_override: Option<&Path>) -> DataPaths {
        let dir = data_dir_override.map_or_else(
            || PathBuf::from(&self.defaults.data_dir),
            Path::to_path_buf,
        );
        DataPaths {
            courses: dir.join(&self.defaults.courses_file),
            enrollments: dir.join(&self.defaults.enrollments_file),
            content: dir.join(&self.defaults.content_file),
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    config: LecternConfig,
}

impl ConfigManager {
    /// Open the configuration at `path`, or at the default location when
    /// `None`, creating it with defaults if it does not exist.
    pub fn new(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };
        let config = Self::load_config(&config_path)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Get the default configuration file path
    fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectern");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir.join("lectern.toml"))
    }

    /// Load configuration from file or create default
    fn load_config(config_path: &Path) -> Result<LecternConfig, ConfigError> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: LecternConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("Writing default configuration to {}", config_path.display());
            let config = LecternConfig::default();
            Self::save_config_to_file(config_path, &config)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    fn save_config_to_file(config_path: &Path, config: &LecternConfig) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let toml_content = toml::to_string_pretty(config)?;
        fs::write(config_path, toml_content)?;
        Ok(())
    }

    /// Save the current configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        Self::save_config_to_file(&self.config_path, &self.config)
    }

    pub fn config(&self) -> &LecternConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let defaults = &self.config.defaults;
        let value = match key {
            "data_dir" => defaults.data_dir.clone(),
            "courses_file" => defaults.courses_file.clone(),
            "enrollments_file" => defaults.enrollments_file.clone(),
            "content_file" => defaults.content_file.clone(),
            "color_output" => defaults.color_output.to_string(),
            _ => {
                return self
                    .config
                    .custom
                    .get(key)
                    .cloned()
                    .ok_or_else(|| ConfigError::KeyNotFound {
                        key: key.to_string(),
                    });
            }
        };
        Ok(value)
    }

    /// Set a configuration value; unknown keys go to the custom table
    pub fn set(&mut self, key: String, value: String) -> Result<(), ConfigError> {
        let defaults = &mut self.config.defaults;
        match key.as_str() {
            "data_dir" => defaults.data_dir = value,
            "courses_file" => defaults.courses_file = value,
            "enrollments_file" => defaults.enrollments_file = value,
            "content_file" => defaults.content_file = value,
            "color_output" => {
                defaults.color_output = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue { key, value })?;
            }
            _ => {
                self.config.custom.insert(key, value);
            }
        }
        self.save()
    }

    /// Get all configuration values, custom keys included
    pub fn get_all(&self) -> BTreeMap<String, String> {
        let defaults = &self.config.defaults;
        let mut all_config = BTreeMap::from([
            ("data_dir".to_string(), defaults.data_dir.clone()),
            ("courses_file".to_string(), defaults.courses_file.clone()),
            (
                "enrollments_file".to_string(),
                defaults.enrollments_file.clone(),
            ),
            ("content_file".to_string(), defaults.content_file.clone()),
            ("color_output".to_string(), defaults.color_output.to_string()),
        ]);

        for (key, value) in &self.config.custom {
            all_config.entry(key.clone()).or_insert_with(|| value.clone());
        }

        all_config
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.config = LecternConfig::default();
        self.save()
    }
}
