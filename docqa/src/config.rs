// Runtime configuration for the extraction harness

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document_processing::DEFAULT_RECENT_CAPACITY;

/// Contents of `config/docqa.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocQaConfig {
    pub documents: DocumentsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Directory holding uploaded documents
    pub data_dir: PathBuf,
    /// Descend into subdirectories when listing documents
    pub recursive: bool,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            recursive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    pub level: String,
    pub recent_capacity: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            recent_capacity: DEFAULT_RECENT_CAPACITY,
        }
    }
}

impl DocQaConfig {
    /// Relative location probed when no explicit path is given
    pub const DEFAULT_PATH: &'static str = "config/docqa.toml";

    /// Load configuration from a specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::load_from_str(&toml_str)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Load configuration from TOML string
    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse config TOML")
    }

    /// Explicit path if given, else the default location if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let default_path = Path::new(Self::DEFAULT_PATH);
                if default_path.is_file() {
                    Self::load_from_path(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
