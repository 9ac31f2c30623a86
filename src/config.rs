//! Catalog configuration
//!
//! Read from a JSON file:
//!
//! ```json
//! { "data_dir": "/var/lib/db", "skip_malformed": false, "pretty": true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{CatalogError, CatalogResult};

/// Configuration for a [`DescriptorCatalog`](crate::schema::DescriptorCatalog)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Data directory (required). Descriptors live under
    /// `<data_dir>/metadata/descriptors/`.
    pub data_dir: PathBuf,

    /// Skip unreadable descriptor files during load instead of failing
    #[serde(default)]
    pub skip_malformed: bool,

    /// Write descriptor files as pretty-printed JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl CatalogConfig {
    /// Config with defaults for everything but the data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            skip_malformed: false,
            pretty: default_pretty(),
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CatalogError::config(format!("failed to read config: {}", e)))?;

        let config: CatalogConfig = serde_json::from_str(&content)
            .map_err(|e| CatalogError::config(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("data_dir", config.data_dir.display().to_string().as_str())],
        );
        Ok(config)
    }

    fn validate(&self) -> CatalogResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(CatalogError::config("data_dir must not be empty"));
        }
        Ok(())
    }

    /// Directory holding the descriptor files
    pub fn descriptor_dir(&self) -> PathBuf {
        self.data_dir.join("metadata").join("descriptors")
    }
}
