//! Block codec error types

use thiserror::Error;

/// Errors raised by the block codec and fixed-stride index tables
#[derive(Debug, Error)]
pub enum BlockError {
    /// Index file length is not a whole number of records
    #[error("{table} is {len} bytes, not a multiple of its {stride}-byte record")]
    Misaligned {
        /// Table description
        table: &'static str,
        /// File length
        len: usize,
        /// Record size
        stride: usize,
    },

    /// Block number beyond the block index
    #[error("block {block} out of range ({count} blocks)")]
    BlockOutOfRange {
        /// Requested block
        block: u32,
        /// Blocks in the index
        count: usize,
    },

    /// Byte range outside the buffer it addresses
    #[error("range {offset}+{size} outside {len}-byte buffer")]
    SliceOutOfRange {
        /// Start of the range
        offset: u64,
        /// Length of the range
        size: u64,
        /// Buffer length
        len: usize,
    },

    /// An entry or block no longer fits the 32-bit on-disk fields
    #[error("{what} of {size} bytes exceeds the format limit")]
    TooLarge {
        /// What overflowed
        what: &'static str,
        /// Offending size
        size: usize,
    },

    /// Compression/decompression error
    #[error("compression error: {0}")]
    Compression(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary parsing error
    #[error("binary parsing error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Result type for block operations
pub type BlockResult<T> = Result<T, BlockError>;
