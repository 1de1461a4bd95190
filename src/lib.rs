//! Core implementation of Commander
//!
//! Commander runs a single shell command in every project listed in a configuration
//! file. Projects can be narrowed down by tag (search and exclude) and by name before
//! the command runs. Every selected project is attempted once, one after another, and
//! all failures are reported together at the end of the run.

use std::path::PathBuf;

use log::{debug, warn};

use crate::config_file::{Config, ConfigError};
use crate::projects::collection::ProjectCollection;

pub mod config_file;
pub mod logger;
pub mod projects;
pub mod report;
pub mod runner;
pub mod selectors;
pub mod theme;

/// Load configuration from a file (or the default file in the current directory),
/// returning every configured project and the config file path.
///
/// Relative project paths are kept relative to the current directory. Whether a
/// project path exists (or is even non-empty) is only discovered when the command
/// runs there, as a failure of that project alone.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found, cannot be read or parsed.
pub fn load_config(config_file: Option<&str>) -> Result<(ProjectCollection, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => Config::find_config()?,
    };
    debug!("Loading projects from config file: {}", config_path.display());

    let parsed = Config::from_file(&config_path)?;
    if parsed.projects.is_empty() {
        warn!("No projects configured in {}", config_path.display());
    }

    let projects = parsed
        .projects
        .into_iter()
        .map(|(key, project)| project.into_project(key))
        .collect();
    Ok((projects, config_path))
}
