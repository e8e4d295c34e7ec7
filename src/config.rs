//! Catalog configuration
//!
//! Loaded from a JSON file. Every field has a default, so an empty object
//! (or no file at all, for `serve`) is a valid configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogResult, DatasetProvider, FileDataset, StaticDataset};
use crate::http_server::HttpServerConfig;
use crate::query::DEFAULT_PAGE_SIZE;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Records per listing page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// JSON dataset file; the built-in dataset is used when absent
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,

    /// Re-read `dataset_path` on every request instead of once at boot
    #[serde(default)]
    pub request_scoped_dataset: bool,

    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_log_filter() -> String {
    "vehicle_catalog=info,tower_http=info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            page_size: default_page_size(),
            dataset_path: None,
            request_scoped_dataset: false,
            log_filter: default_log_filter(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: CatalogConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }

        if self.request_scoped_dataset && self.dataset_path.is_none() {
            return Err(ConfigError::Invalid(
                "request_scoped_dataset requires dataset_path".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the HTTP server
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
            page_size: self.page_size,
        }
    }

    /// Build the dataset provider this configuration describes
    pub fn open_dataset(&self) -> CatalogResult<Arc<dyn DatasetProvider>> {
        match (&self.dataset_path, self.request_scoped_dataset) {
            (Some(path), true) => Ok(Arc::new(FileDataset::new(path.clone()))),
            (Some(path), false) => Ok(Arc::new(StaticDataset::load(path)?)),
            (None, _) => Ok(Arc::new(StaticDataset::builtin()?)),
        }
    }
}
