//! Fixed-stride index tables
//!
//! `.bzs`, `.bzv`, `.zdx` and the RawGenBook `.idx` are flat arrays of
//! little-endian records with no header, so their length must be an exact
//! multiple of the record size.

use std::io::Cursor;

use binrw::{BinRead, BinWrite};
use tracing::debug;

use super::error::{BlockError, BlockResult};

/// A record of an index table
pub trait FixedRecord: for<'a> BinRead<Args<'a> = ()> + for<'a> BinWrite<Args<'a> = ()> {
    /// Encoded size in bytes
    const SIZE: usize;
    /// Name used in error messages
    const TABLE: &'static str;
}

/// Parse a whole table
pub fn read_table<T: FixedRecord>(bytes: &[u8]) -> BlockResult<Vec<T>> {
    if bytes.len() % T::SIZE != 0 {
        return Err(BlockError::Misaligned {
            table: T::TABLE,
            len: bytes.len(),
            stride: T::SIZE,
        });
    }

    let count = bytes.len() / T::SIZE;
    let mut cursor = Cursor::new(bytes);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(T::read_le(&mut cursor)?);
    }
    debug!("Loaded {} with {} records", T::TABLE, count);
    Ok(records)
}

/// Serialize a whole table
pub fn write_table<T: FixedRecord>(records: &[T]) -> BlockResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(records.len() * T::SIZE));
    for record in records {
        record.write_le(&mut cursor)?;
    }
    Ok(cursor.into_inner())
}
