//! Configuration snapshots recorded alongside a formatted volume.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::configuration::Configuration;
use crate::CONFIG_SCHEMA_VERSION;

/// A loaded configuration with capture metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub schema_version: String,
    pub captured_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    pub config: Configuration,
}

impl ConfigSnapshot {
    pub fn new(config: Configuration) -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            captured_at: Utc::now(),
            source: None,
            config,
        }
    }

    /// Record the file the configuration was read from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
