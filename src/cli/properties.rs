// src/cli/properties.rs

use crate::constants::{PROPERTIES_ENV, PROPERTIES_FILENAME};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures loading a properties file.
#[derive(Error, Debug)]
pub enum PropertiesError {
    /// The file could not be read.
    #[error("Could not read properties file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has the wrong shape.
    #[error("Could not parse properties file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// The deserialized structure of a `cli.toml` file:
///
/// ```toml
/// [cli]
/// version = "1.4.0"
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CliProperties {
    /// The `[cli]` table.
    #[serde(default)]
    pub cli: CliSection,
}

/// The `[cli]` table of a properties file.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CliSection {
    /// Version shown in help footers.
    pub version: Option<String>,
}

/// Loads and parses a properties file.
pub fn load(path: &Path) -> Result<CliProperties, PropertiesError> {
    let content = fs::read_to_string(path).map_err(|source| PropertiesError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| PropertiesError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Where the properties file is expected: `CMDKIT_PROPERTIES` if set, otherwise
/// `cli.toml` next to the running executable.
pub fn default_location() -> Option<PathBuf> {
    if let Some(path) = env::var_os(PROPERTIES_ENV) {
        return Some(PathBuf::from(path));
    }
    let exe = env::current_exe().ok()?;
    Some(exe.parent()?.join(PROPERTIES_FILENAME))
}

/// Reads `cli.version` from the given file. Any failure just means "no version".
pub fn version_from(path: &Path) -> Option<String> {
    match load(path) {
        Ok(properties) => {
            if properties.cli.version.is_none() {
                log::debug!("No cli.version in {}", path.display());
            }
            properties.cli.version
        }
        Err(e) => {
            log::debug!(
                "{} - define cli.version in order to get a version footer in the command help",
                e
            );
            None
        }
    }
}

/// Reads the version from the default location, if there is one.
pub fn discover_version() -> Option<String> {
    default_location().and_then(|path| version_from(&path))
}
