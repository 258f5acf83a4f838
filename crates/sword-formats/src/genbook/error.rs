//! RawGenBook error types

use std::path::PathBuf;

use thiserror::Error;

use crate::block::BlockError;

/// Errors raised by RawGenBook readers and writers
#[derive(Debug, Error)]
pub enum GenBookError {
    /// A tree record has no name terminator or a short link header
    #[error("tree file truncated at byte {0}")]
    Truncated(u64),

    /// A link points outside the tree
    #[error("node {node} links to missing node {link}")]
    BadLink {
        /// Node holding the link
        node: usize,
        /// Link value
        link: i32,
    },

    /// Links form a cycle
    #[error("tree links of node {0} form a cycle")]
    Cycle(usize),

    /// Tree and data index disagree
    #[error("tree has {nodes} nodes but data index has {records} records")]
    CountMismatch {
        /// Nodes in `.bdt`
        nodes: usize,
        /// Records in `.idx`
        records: usize,
    },

    /// Node ordinal beyond the tree
    #[error("node {index} out of range ({count} nodes)")]
    NodeOutOfRange {
        /// Requested node
        index: usize,
        /// Nodes in the tree
        count: usize,
    },

    /// Node names may not contain NUL bytes
    #[error("path {0:?} contains a NUL byte")]
    InvalidPath(String),

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

impl GenBookError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type for RawGenBook operations
pub type GenBookResult<T> = Result<T, GenBookError>;
