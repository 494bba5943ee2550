//! # Processor configuration
//!
//! [`ProcessorConfig`] controls how the ADES processor routes and labels data:
//!
//! - `default_source`: the source attached to a reduced datum whose record has none
//!   (`"MPC"` by default),
//! - `plaintext_mimetypes`: the MIME types handed to the PSV parser
//!   (`text/plain` and `text/csv` by default).
//!
//! Configurations are usually deserialized from the host application's settings,
//! or built with [`ProcessorConfig::builder`]:
//!
//! ```rust
//! use ades_ingest::config::ProcessorConfig;
//!
//! let config = ProcessorConfig::builder()
//!     .default_source("LCO")
//!     .plaintext_mimetypes(["text/plain"])
//!     .build()
//!     .unwrap();
//! assert!(config.is_plaintext("text/plain"));
//! assert!(!config.is_plaintext("text/csv"));
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_SOURCE, PLAINTEXT_MIMETYPES},
    ingest_errors::IngestError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub default_source: String,
    pub plaintext_mimetypes: Vec<String>,
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::new()
    }

    /// Whether `mimetype` is routed to the plaintext parser.
    pub fn is_plaintext(&self, mimetype: &str) -> bool {
        self.plaintext_mimetypes.iter().any(|m| m == mimetype)
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            default_source: DEFAULT_SOURCE.to_string(),
            plaintext_mimetypes: PLAINTEXT_MIMETYPES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Builder for [`ProcessorConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_source(mut self, v: impl Into<String>) -> Self {
        self.config.default_source = v.into();
        self
    }
    pub fn plaintext_mimetypes<I, S>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.plaintext_mimetypes = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<ProcessorConfig, IngestError> {
        let c = &self.config;

        if c.default_source.trim().is_empty() {
            return Err(IngestError::InvalidConfig(
                "default_source must not be empty".into(),
            ));
        }
        if c.plaintext_mimetypes.is_empty() {
            return Err(IngestError::InvalidConfig(
                "plaintext_mimetypes must list at least one type".into(),
            ));
        }
        if let Some(bad) = c.plaintext_mimetypes.iter().find(|m| !m.contains('/')) {
            return Err(IngestError::InvalidConfig(format!(
                "not a MIME type: {bad:?}"
            )));
        }

        Ok(self.config)
    }
}
