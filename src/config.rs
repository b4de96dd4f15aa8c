//! Configuration loaded from YAML.
//!
//! ```yaml
//! import:
//!   file_uri: https://download.db-ip.com/free/dbip-city-ipv4.csv.gz
//!   download_dir: /var/cache/iplookup
//!   preallocate: true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
}

/// Options for importing the range source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// URI of the source file: `http(s)://`, `file://` or a plain path
    #[serde(default)]
    pub file_uri: String,
    /// Directory compressed downloads are extracted into
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Reserve storage for a full-size source before importing
    #[serde(default)]
    pub preallocate: bool,
}

impl ImportConfig {
    /// Create an import configuration for the given source.
    pub fn new(file_uri: &str) -> Self {
        Self {
            file_uri: file_uri.to_string(),
            ..Self::default()
        }
    }

    /// Get the download directory, defaulting to the OS temp directory.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Check that a source is configured.
    pub fn validate(&self) -> Result<()> {
        if self.file_uri.trim().is_empty() {
            return Err(Error::Config("import.file_uri is not set".to_string()));
        }
        Ok(())
    }
}

impl Config {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
