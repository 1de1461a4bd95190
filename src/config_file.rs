//! Configuration file handling for Commander

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::projects::project::Project;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unable to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
}

/// Configuration for a single project
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigProject {
    pub name: Option<String>,
    pub path: PathBuf,
    pub tags: Option<Vec<String>>,
}

impl ConfigProject {
    /// Turn the config entry into a [`Project`].
    ///
    /// The path is kept as written: a relative path is relative to the directory
    /// `commander` is started from, not to the config file.
    #[must_use]
    pub fn into_project(self, key: String) -> Project {
        Project {
            key,
            name: self.name,
            path: self.path,
            tags: self.tags.unwrap_or_default().into_iter().collect::<BTreeSet<_>>(),
        }
    }
}

/// Root configuration structure for Commander
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub projects: BTreeMap<String, ConfigProject>,
}

/// Default configuration file name
pub const DEFAULT_FILENAME: &str = "commander.yaml";

/// List of supported configuration file names, in lookup order
const FILENAMES: [&str; 3] = [DEFAULT_FILENAME, "commander.yml", "commander.json"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|e| ConfigError::Read {
            path: file.to_path_buf(),
            source: e,
        })?;
        Self::parse(file, &contents)
    }

    fn parse(file: &Path, contents: &str) -> Result<Config, ConfigError> {
        if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })
        } else if contents.trim().is_empty() {
            // serde_yaml rejects an empty document; treat it as "no projects"
            Ok(Config::default())
        } else {
            serde_yaml::from_str(contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })
        }
    }

    /// Searches the current directory for a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined,
    /// or `ConfigError::ConfigNotFound` if no config file is found.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        debug!("Searching for config file in {}", cwd.display());
        for file in &FILENAMES {
            let config_path = cwd.join(file);
            if config_path.exists() {
                info!("Found config file: {}", config_path.display());
                return Ok(config_path);
            }
        }
        Err(ConfigError::ConfigNotFound(cwd.join(DEFAULT_FILENAME)))
    }
}
