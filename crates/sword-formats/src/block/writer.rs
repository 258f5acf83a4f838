//! Accumulating block writer

use tracing::debug;

use super::compression::compress;
use super::entry::{BlockEntry, EntryLocation};
use super::error::{BlockError, BlockResult};

/// Block threshold used by zLD dictionaries
pub const DICTIONARY_BLOCK_SIZE: usize = 4096;

/// Compressed blocks produced by a [`BlockWriter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinishedBlocks {
    /// Block index, one record per block
    pub blocks: Vec<BlockEntry>,
    /// Concatenated compressed blocks
    pub data: Vec<u8>,
}

impl FinishedBlocks {
    /// Compressed bytes of one block
    pub fn block_data(&self, block: usize) -> Option<&[u8]> {
        let entry = self.blocks.get(block)?;
        let start = usize::try_from(entry.offset).ok()?;
        let end = usize::try_from(entry.end()).ok()?;
        self.data.get(start..end)
    }
}

/// Packs entries into zlib blocks
///
/// Entries are appended to an in-memory block. A writer with a threshold
/// closes the block before an entry that would take it past the threshold;
/// an unbounded writer only closes blocks on [`BlockWriter::flush`]. The
/// location handed out for an entry always refers to the block it was
/// actually written into.
///
/// Not shareable between threads while writing; finish it from the thread
/// that filled it.
#[derive(Debug, Default)]
pub struct BlockWriter {
    threshold: Option<usize>,
    nul_terminated: bool,
    current: Vec<u8>,
    finished: FinishedBlocks,
}

impl BlockWriter {
    /// Writer that only closes blocks on explicit flush
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Writer that closes a block before it would exceed `threshold` bytes
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold: Some(threshold),
            ..Self::default()
        }
    }

    /// Follow every entry with a NUL byte
    #[must_use]
    pub const fn nul_terminated(mut self, enabled: bool) -> Self {
        self.nul_terminated = enabled;
        self
    }

    /// Append an entry, returning where it was placed
    pub fn append(&mut self, entry: &[u8]) -> BlockResult<EntryLocation> {
        let encoded_len = entry.len() + usize::from(self.nul_terminated);

        if let Some(threshold) = self.threshold {
            if !self.current.is_empty() && self.current.len() + encoded_len > threshold {
                self.flush()?;
            }
        }

        let location = EntryLocation {
            block: to_u32("block count", self.finished.blocks.len())?,
            offset: to_u32("block", self.current.len())?,
            size: to_u32("entry", entry.len())?,
        };

        self.current.extend_from_slice(entry);
        if self.nul_terminated {
            self.current.push(0);
        }
        Ok(location)
    }

    /// Compress the current block, if it holds anything
    pub fn flush(&mut self) -> BlockResult<()> {
        if self.current.is_empty() {
            return Ok(());
        }

        let compressed = compress(&self.current)?;
        let entry = BlockEntry {
            offset: to_u32("data file", self.finished.data.len())?,
            compressed_size: to_u32("compressed block", compressed.len())?,
            uncompressed_size: to_u32("block", self.current.len())?,
        };
        debug!(
            "Flushed block {} ({} -> {} bytes)",
            self.finished.blocks.len(),
            entry.uncompressed_size,
            entry.compressed_size
        );

        self.finished.data.extend_from_slice(&compressed);
        self.finished.blocks.push(entry);
        self.current.clear();
        Ok(())
    }

    /// Number of closed blocks
    pub fn block_count(&self) -> usize {
        self.finished.blocks.len()
    }

    /// Bytes waiting in the open block
    pub fn pending_len(&self) -> usize {
        self.current.len()
    }

    /// Flush the open block and hand over the result
    pub fn finish(mut self) -> BlockResult<FinishedBlocks> {
        self.flush()?;
        Ok(self.finished)
    }
}

fn to_u32(what: &'static str, size: usize) -> BlockResult<u32> {
    u32::try_from(size).map_err(|_| BlockError::TooLarge { what, size })
}
