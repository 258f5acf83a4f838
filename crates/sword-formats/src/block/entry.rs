//! Block index record

use binrw::{BinRead, BinWrite};

use super::table::FixedRecord;

/// One compressed block: where it lives in the data file and how big it is
///
/// Encoded as 12 little-endian bytes in `.bzs` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct BlockEntry {
    /// Byte offset of the compressed block in the data file
    pub offset: u32,
    /// Compressed length
    pub compressed_size: u32,
    /// Length after decompression
    pub uncompressed_size: u32,
}

impl FixedRecord for BlockEntry {
    const SIZE: usize = 12;
    const TABLE: &'static str = "block index";
}

impl BlockEntry {
    /// End of the compressed block in the data file
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.compressed_size)
    }
}

/// Where a written entry landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryLocation {
    /// Block number
    pub block: u32,
    /// Offset within the decompressed block
    pub offset: u32,
    /// Entry length, excluding any terminator
    pub size: u32,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::block::{BlockError, read_table, write_table};

    #[test]
    fn test_record_layout() {
        let entry = BlockEntry {
            offset: 0x0403_0201,
            compressed_size: 0x10,
            uncompressed_size: 0x20,
        };
        let bytes = write_table(&[entry]).expect("write");
        assert_eq!(
            bytes,
            vec![0x01, 0x02, 0x03, 0x04, 0x10, 0, 0, 0, 0x20, 0, 0, 0]
        );
        assert_eq!(read_table::<BlockEntry>(&bytes).expect("read"), vec![entry]);
    }

    #[test]
    fn test_misaligned_table() {
        let result = read_table::<BlockEntry>(&[0u8; 13]);
        assert!(matches!(
            result,
            Err(BlockError::Misaligned { len: 13, stride: 12, .. })
        ));
    }

    #[test]
    fn test_empty_table() {
        assert!(read_table::<BlockEntry>(&[]).expect("read").is_empty());
    }
}
