//! Conf error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a module `.conf` file
#[derive(Debug, Error)]
pub enum ConfError {
    /// The file could not be opened or read
    #[error("failed to read conf {path}: {source}")]
    Read {
        /// Path of the conf file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written
    #[error("failed to write conf {path}: {source}")]
    Write {
        /// Path of the conf file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for conf operations
pub type ConfResult<T> = Result<T, ConfError>;
