//! Error types for corpus ingestion and emission

use std::path::PathBuf;

use sword_formats::conf::{ConfError, ModuleKind};
use sword_formats::{CodecError, ErrorClass};
use thiserror::Error;

/// Errors raised by the corpus pipeline
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Module codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Conf file error
    #[error(transparent)]
    Conf(#[from] ConfError),

    /// No codec reads or writes this driver; raised before any I/O
    #[error("unsupported module driver '{driver}'")]
    Unsupported {
        /// Driver named by the conf, or the requested kind
        driver: String,
    },

    /// Block id that does not address an entry of the target module kind
    #[error("block id '{id}' is not a valid {kind} key")]
    InvalidBlockId {
        /// Offending id
        id: String,
        /// Kind the id was resolved against
        kind: ModuleKind,
    },

    /// File system error outside the codecs
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Class of the failure in the codec taxonomy
    ///
    /// JSON errors count as format errors.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Codec(e) => e.class(),
            Self::Conf(_) | Self::Io { .. } => ErrorClass::Io,
            Self::Unsupported { .. } => ErrorClass::Unsupported,
            Self::InvalidBlockId { .. } => ErrorClass::Reference,
            Self::Json(_) => ErrorClass::Format,
        }
    }
}

/// Result type for corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;
