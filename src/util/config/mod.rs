//! sysc configuration files
//!
//! A [`CompileConfig`] can be read from a TOML file. Every key is optional;
//! missing keys take their defaults.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. --config <FILE>
//! 3. Project-level (sysc.toml in the working directory or a parent)
//! 4. Default values
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use sysc::util::config::load_config;
//!
//! let config = load_config("sysc.toml").unwrap();
//! println!("max errors: {}", config.max_errors);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::frontend::config::CompileConfig;

/// Project config file name
pub const CONFIG_FILE_NAME: &str = "sysc.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Parse a config from TOML text
pub fn parse_config(content: &str) -> Result<CompileConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load a config file; a missing file is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<CompileConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Walk from `start` up to the filesystem root looking for `sysc.toml`
pub fn find_project_config(start: impl AsRef<Path>) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Project config if there is one, defaults otherwise
pub fn load_project_config(start: impl AsRef<Path>) -> Result<CompileConfig, ConfigError> {
    match find_project_config(start) {
        Some(path) => load_config(path),
        None => Ok(CompileConfig::default()),
    }
}

/// Serialize a config as TOML
pub fn to_toml(config: &CompileConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
