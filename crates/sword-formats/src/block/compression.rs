//! zlib compression of blocks

use std::io::Read;

use flate2::Compression;
use flate2::read::{ZlibDecoder, ZlibEncoder};

use super::error::{BlockError, BlockResult};

/// Upper bound on a decompressed block (64 MiB)
///
/// Whole-testament blocks of large commentaries stay well below this.
pub const MAX_BLOCK_SIZE: usize = 64 * 1024 * 1024;

/// Compress a block with zlib
pub fn compress(data: &[u8]) -> BlockResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(data, Compression::default());
    let mut compressed = Vec::new();
    encoder
        .read_to_end(&mut compressed)
        .map_err(|e| BlockError::Compression(format!("zlib compression failed: {e}")))?;
    Ok(compressed)
}

/// Decompress a zlib block, refusing output beyond [`MAX_BLOCK_SIZE`]
pub fn inflate(data: &[u8]) -> BlockResult<Vec<u8>> {
    inflate_with_limit(data, MAX_BLOCK_SIZE)
}

/// Decompress a zlib block with an explicit size limit
pub fn inflate_with_limit(data: &[u8], limit: usize) -> BlockResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();

    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = decoder
            .read(&mut buffer)
            .map_err(|e| BlockError::Compression(format!("zlib decompression failed: {e}")))?;

        if bytes_read == 0 {
            break;
        }

        if decompressed.len() + bytes_read > limit {
            return Err(BlockError::Compression(format!(
                "decompressed size exceeds limit of {limit} bytes"
            )));
        }

        decompressed.extend_from_slice(&buffer[..bytes_read]);
    }

    Ok(decompressed)
}
