//! zLD error types

use std::path::PathBuf;

use thiserror::Error;

use crate::block::BlockError;

/// Errors raised by zLD readers and writers
#[derive(Debug, Error)]
pub enum ZldError {
    /// A record runs past the end of its file
    #[error("{file} truncated at byte {offset}")]
    Truncated {
        /// File description
        file: &'static str,
        /// Offset of the unfinished record
        offset: usize,
    },

    /// Key index and entry index disagree
    #[error("key index has {keys} keys but entry index has {entries} records")]
    CountMismatch {
        /// Keys in `.idx`
        keys: usize,
        /// Records in `.zdx`
        entries: usize,
    },

    /// Entry position beyond the key list
    #[error("entry {index} out of range ({count} entries)")]
    EntryOutOfRange {
        /// Requested position
        index: usize,
        /// Entries in the module
        count: usize,
    },

    /// Keys may not contain NUL bytes
    #[error("key {0:?} contains a NUL byte")]
    InvalidKey(String),

    /// Definitions are NUL-terminated in their block, so may not contain one
    #[error("definition of key {0:?} contains a NUL byte")]
    InvalidDefinition(String),

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

impl ZldError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type for zLD operations
pub type ZldResult<T> = Result<T, ZldError>;
