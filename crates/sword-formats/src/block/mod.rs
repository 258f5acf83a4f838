//! Block codec shared by the compressed module formats
//!
//! Entries are concatenated into blocks which are zlib-compressed one by one
//! and stored back to back in a data file. A block index records each
//! block's offset and sizes, and each entry is addressed by
//! `(block, offset within the decompressed block, size)`.

mod compression;
mod entry;
mod error;
mod table;
mod writer;

pub use compression::{MAX_BLOCK_SIZE, compress, inflate, inflate_with_limit};
pub use entry::{BlockEntry, EntryLocation};
pub use error::{BlockError, BlockResult};
pub use table::{FixedRecord, read_table, write_table};
pub use writer::{BlockWriter, DICTIONARY_BLOCK_SIZE, FinishedBlocks};

use tracing::warn;

/// Decompress one block of a data file
pub fn read_block(data: &[u8], entry: &BlockEntry) -> BlockResult<Vec<u8>> {
    let compressed = byte_range(data, u64::from(entry.offset), u64::from(entry.compressed_size))?;
    let block = inflate(compressed)?;
    if block.len() != entry.uncompressed_size as usize {
        warn!(
            "Block at offset {} inflated to {} bytes, index says {}",
            entry.offset,
            block.len(),
            entry.uncompressed_size
        );
    }
    Ok(block)
}

/// Slice an entry out of a decompressed block
pub fn slice_entry(block: &[u8], offset: u32, size: u32) -> BlockResult<&[u8]> {
    byte_range(block, u64::from(offset), u64::from(size))
}

/// Bounds-checked sub-slice
pub(crate) fn byte_range(buffer: &[u8], offset: u64, size: u64) -> BlockResult<&[u8]> {
    let out_of_range = || BlockError::SliceOutOfRange {
        offset,
        size,
        len: buffer.len(),
    };
    let start = usize::try_from(offset).map_err(|_| out_of_range())?;
    let end = offset
        .checked_add(size)
        .and_then(|end| usize::try_from(end).ok())
        .ok_or_else(out_of_range)?;
    buffer.get(start..end).ok_or_else(out_of_range)
}

/// Strip trailing NUL padding from entry text
pub fn trim_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_bounds() {
        let block = b"hello world";
        assert_eq!(slice_entry(block, 6, 5).expect("slice"), b"world");
        assert!(matches!(
            slice_entry(block, 6, 6),
            Err(BlockError::SliceOutOfRange { .. })
        ));
        assert!(slice_entry(block, u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_read_block_out_of_range() {
        let entry = BlockEntry {
            offset: 10,
            compressed_size: 5,
            uncompressed_size: 5,
        };
        assert!(matches!(
            read_block(&[0u8; 12], &entry),
            Err(BlockError::SliceOutOfRange { .. })
        ));
    }

    #[test]
    fn test_trim_nul() {
        assert_eq!(trim_nul(b"text\0\0"), b"text");
        assert_eq!(trim_nul(b"\0\0"), b"");
        assert_eq!(trim_nul(b"a\0b"), b"a\0b");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn block_round_trip(
                entries in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 1..60),
                threshold in prop::option::of(16usize..2048),
                nul in any::<bool>(),
            ) {
                let mut writer = match threshold {
                    Some(threshold) => BlockWriter::with_threshold(threshold),
                    None => BlockWriter::unbounded(),
                }
                .nul_terminated(nul);

                let locations: Vec<_> = entries
                    .iter()
                    .map(|entry| writer.append(entry).unwrap())
                    .collect();
                let finished = writer.finish().unwrap();

                for (entry, location) in entries.iter().zip(&locations) {
                    if location.size == 0 {
                        prop_assert!(entry.is_empty());
                        continue;
                    }
                    let block_entry = finished.blocks[location.block as usize];
                    let block = read_block(&finished.data, &block_entry).unwrap();
                    let bytes = slice_entry(&block, location.offset, location.size).unwrap();
                    prop_assert_eq!(bytes, entry.as_slice());
                }
            }
        }
    }
}
