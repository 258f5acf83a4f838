//! Ingestion configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sword_formats::OpenOptions;

use crate::error::{CorpusError, CorpusResult};

/// Settings for opening and extracting modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Module root that conf `DataPath` values are relative to
    pub base_path: PathBuf,

    /// Open modules without extracting a corpus
    pub skip_ir_extraction: bool,

    /// Decompressed blocks memoised per zText/zCom module; 0 disables
    pub block_cache_capacity: usize,

    /// Versification used when a conf does not name one
    pub default_versification: String,

    /// Produce plain text next to the raw markup
    pub strip_markup: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            skip_ir_extraction: false,
            block_cache_capacity: 16,
            default_versification: "KJV".to_string(),
            strip_markup: true,
        }
    }
}

impl IngestConfig {
    /// Create a configuration rooted at a module directory
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the module root
    #[must_use]
    pub fn with_base_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_path = path.as_ref().to_path_buf();
        self
    }

    /// Enable or disable corpus extraction
    #[must_use]
    pub const fn with_skip_ir_extraction(mut self, skip: bool) -> Self {
        self.skip_ir_extraction = skip;
        self
    }

    /// Set the block cache capacity
    #[must_use]
    pub const fn with_block_cache_capacity(mut self, capacity: usize) -> Self {
        self.block_cache_capacity = capacity;
        self
    }

    /// Set the fallback versification
    #[must_use]
    pub fn with_default_versification(mut self, id: impl Into<String>) -> Self {
        self.default_versification = id.into();
        self
    }

    /// Enable or disable markup stripping
    #[must_use]
    pub const fn with_strip_markup(mut self, strip: bool) -> Self {
        self.strip_markup = strip;
        self
    }

    /// Codec options derived from this configuration
    pub fn open_options(&self) -> OpenOptions {
        OpenOptions::default().with_cache_capacity(self.block_cache_capacity)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> CorpusResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(CorpusError::io(path))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> CorpusResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
