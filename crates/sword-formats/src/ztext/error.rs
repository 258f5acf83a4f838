//! Verse store error types

use std::path::PathBuf;

use thiserror::Error;

use super::Testament;
use crate::block::BlockError;
use crate::reference::ReferenceError;

/// Errors raised by zText and zCom readers and writers
#[derive(Debug, Error)]
pub enum VerseStoreError {
    /// Neither testament has index files
    #[error("no testament data under {0}")]
    NoTestamentData(PathBuf),

    /// The reference belongs to a testament the module does not carry
    #[error("module has no {0} data")]
    MissingTestament(Testament),

    /// The verse index has no record for the slot
    #[error("verse index slot {index} out of range ({count} records)")]
    SlotOutOfRange {
        /// Requested slot
        index: u32,
        /// Records in the verse index
        count: usize,
    },

    /// Verse text does not fit the 16-bit size field
    #[error("text for {reference} is {size} bytes, the limit is 65535")]
    VerseTooLong {
        /// OSIS reference
        reference: String,
        /// Text length
        size: usize,
    },

    /// Reference error
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Block or index table error
    #[error(transparent)]
    Block(#[from] BlockError),

    /// I/O error on a module file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl VerseStoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type for verse store operations
pub type VerseStoreResult<T> = Result<T, VerseStoreError>;
