//! Configuration file loading for the CLI
//!
//! A bracket may ship its own spacing preset as a `bracketry.toml` next to
//! the bracket file. Otherwise the project and platform locations are
//! searched, and the built-in defaults apply when nothing is found.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use bracketry::{BracketError, config::AppConfig};

/// File name of a spacing preset stored beside a bracket.
pub const PRESET_FILE_NAME: &str = "bracketry.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for BracketError {
    fn from(err: ConfigError) -> Self {
        BracketError::Config(err.to_string())
    }
}

/// Where a configuration file was picked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit,
    /// Preset stored beside the bracket file.
    Bracket,
    /// `bracketry/config.toml` in the working directory.
    Project,
    /// Platform configuration directory.
    System,
}

/// Locate the configuration file for `bracket_path`.
///
/// Search order: the explicit path, the preset beside the bracket, the
/// project directory, then the platform configuration directory. An explicit
/// path is returned even when it does not exist so loading can report it.
pub fn find_config(
    explicit_path: Option<&Path>,
    bracket_path: &Path,
) -> Option<(ConfigSource, PathBuf)> {
    if let Some(path) = explicit_path {
        return Some((ConfigSource::Explicit, path.to_path_buf()));
    }

    let preset = bracket_path
        .parent()
        .map(|dir| dir.join(PRESET_FILE_NAME))
        .filter(|preset| preset.as_path() != bracket_path);
    let system = ProjectDirs::from("com", "bracketry", "bracketry")
        .map(|dirs| dirs.config_dir().join("config.toml"));

    [
        preset.map(|path| (ConfigSource::Bracket, path)),
        Some((ConfigSource::Project, PathBuf::from("bracketry/config.toml"))),
        system.map(|path| (ConfigSource::System, path)),
    ]
    .into_iter()
    .flatten()
    .find(|(source, path)| {
        let found = path.exists();
        if !found {
            debug!(source:?, path = path.display().to_string(); "No configuration file");
        }
        found
    })
}

/// Load the configuration that applies to the bracket at `bracket_path`.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are out of range
pub fn load_config(
    explicit_path: Option<&Path>,
    bracket_path: &Path,
) -> Result<AppConfig, BracketError> {
    match find_config(explicit_path, bracket_path) {
        Some((source, path)) => {
            info!(source:?, path = path.display().to_string(); "Loading configuration");
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: &Path) -> Result<AppConfig, BracketError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config
        .layout()
        .validate()
        .map_err(ConfigError::Validation)?;

    Ok(config)
}
