//! zLD index records

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use binrw::{BinRead, BinWrite};

use super::error::{ZldError, ZldResult};
use crate::block::FixedRecord;

/// Location of a definition: block number and offset in the decompressed block
///
/// Encoded as 8 little-endian bytes in `.zdx` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct ZdxEntry {
    /// Block number in `.zdt`
    pub block: u32,
    /// Offset within the decompressed block
    pub offset: u32,
}

impl FixedRecord for ZdxEntry {
    const SIZE: usize = 8;
    const TABLE: &'static str = "entry index";
}

/// Size prefix of one `.zdt` block frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub(super) struct FrameHeader {
    /// Length of the zlib payload that follows
    pub size: u32,
}

impl FrameHeader {
    pub(super) const SIZE: usize = 4;
}

/// One `.idx` record: a key and the offset of its copy in `.dat`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Offset of the key in the `.dat` key list
    pub dat_offset: u32,
    /// Key bytes without the terminator
    pub key: Vec<u8>,
}

/// A dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZldEntry {
    /// Lookup key
    pub key: String,
    /// Definition text
    pub text: String,
}

impl ZldEntry {
    /// Create an entry
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// Definition length in bytes
    pub fn size(&self) -> usize {
        self.text.len()
    }
}

/// The four files of a dictionary sharing one path stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryPaths {
    /// Key index, `<stem>.idx`
    pub idx: PathBuf,
    /// Key list, `<stem>.dat`
    pub dat: PathBuf,
    /// Entry index, `<stem>.zdx`
    pub zdx: PathBuf,
    /// Compressed definitions, `<stem>.zdt`
    pub zdt: PathBuf,
}

impl DictionaryPaths {
    /// Paths for a stem such as `modules/lexdict/zld/strong/dict`
    pub fn new(stem: &Path) -> Self {
        let with = |extension: &str| {
            let mut path = stem.as_os_str().to_owned();
            path.push(".");
            path.push(extension);
            PathBuf::from(path)
        };
        Self {
            idx: with("idx"),
            dat: with("dat"),
            zdx: with("zdx"),
            zdt: with("zdt"),
        }
    }
}

/// Parse a `.idx` file: big-endian offset followed by a NUL-terminated key
pub(super) fn parse_key_index(bytes: &[u8]) -> ZldResult<Vec<KeyRecord>> {
    let mut records = Vec::new();
    let mut cursor = Cursor::new(bytes);

    while (cursor.position() as usize) < bytes.len() {
        let start = cursor.position() as usize;
        let truncated = || ZldError::Truncated {
            file: "key index",
            offset: start,
        };

        let dat_offset = u32::read_be(&mut cursor).map_err(|_| truncated())?;
        let key_start = cursor.position() as usize;
        let terminator = bytes[key_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(truncated)?;
        records.push(KeyRecord {
            dat_offset,
            key: bytes[key_start..key_start + terminator].to_vec(),
        });
        cursor.set_position((key_start + terminator + 1) as u64);
    }

    Ok(records)
}

/// Serialize `.idx` and `.dat` for keys in stored order
pub(super) fn build_key_files(keys: &[&str]) -> ZldResult<(Vec<u8>, Vec<u8>)> {
    let mut idx = Cursor::new(Vec::new());
    let mut dat = Vec::new();

    for key in keys {
        if key.as_bytes().contains(&0) {
            return Err(ZldError::InvalidKey((*key).to_string()));
        }
        let dat_offset = u32::try_from(dat.len()).map_err(|_| {
            crate::block::BlockError::TooLarge {
                what: "key list",
                size: dat.len(),
            }
        })?;
        dat_offset
            .write_be(&mut idx)
            .map_err(crate::block::BlockError::from)?;
        idx.write_all(key.as_bytes())
            .and_then(|()| idx.write_all(&[0]))
            .map_err(crate::block::BlockError::from)?;

        dat.extend_from_slice(key.as_bytes());
        dat.push(0);
    }

    Ok((idx.into_inner(), dat))
}
