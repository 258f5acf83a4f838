//! zLD dictionary reader

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use binrw::BinRead;
use tracing::{debug, info, warn};

use super::entry::{DictionaryPaths, FrameHeader, ZdxEntry, ZldEntry, parse_key_index};
use super::error::{ZldError, ZldResult};
use crate::block::{BlockEntry, BlockError, byte_range, inflate, read_table};
use crate::conf::{ConfRecord, TextEncoding};

/// Reads entries of a zLD dictionary
///
/// Key and entry indexes plus the compressed definitions are loaded at
/// open; each lookup inflates the block holding its entry.
#[derive(Debug)]
pub struct ZldReader {
    keys: Vec<String>,
    locations: Vec<ZdxEntry>,
    lookup: HashMap<String, usize>,
    blocks: Vec<BlockEntry>,
    data: Vec<u8>,
    sorted: bool,
    encoding: TextEncoding,
}

impl ZldReader {
    /// Open the dictionary files sharing the path stem `stem`
    pub fn open(conf: &ConfRecord, stem: impl AsRef<Path>) -> ZldResult<Self> {
        let stem = stem.as_ref();
        let paths = DictionaryPaths::new(stem);
        let read = |path: &Path| std::fs::read(path).map_err(ZldError::io(path));

        let encoding = conf.text_encoding();
        let keys: Vec<String> = parse_key_index(&read(&paths.idx)?)?
            .into_iter()
            .map(|record| encoding.decode(&record.key))
            .collect();
        let locations: Vec<ZdxEntry> = read_table(&read(&paths.zdx)?)?;
        if keys.len() != locations.len() {
            return Err(ZldError::CountMismatch {
                keys: keys.len(),
                entries: locations.len(),
            });
        }

        let data = read(&paths.zdt)?;
        let blocks = parse_block_frames(&data)?;

        let sorted = keys.windows(2).all(|pair| pair[0] <= pair[1]);
        if !sorted {
            warn!("Dictionary {} keys are not sorted; prefix search scans", stem.display());
        }
        let lookup = keys.iter().enumerate().map(|(i, k)| (k.clone(), i)).collect();

        info!(
            "Opened zLD module '{}' at {} ({} entries, {} blocks)",
            conf.name,
            stem.display(),
            keys.len(),
            blocks.len()
        );

        Ok(Self {
            keys,
            locations,
            lookup,
            blocks,
            data,
            sorted,
            encoding,
        })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in stored order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Position of a key, matched exactly
    pub fn position(&self, key: &str) -> Option<usize> {
        self.lookup.get(key).copied()
    }

    /// Definition of a key, matched exactly
    pub fn get(&self, key: &str) -> ZldResult<Option<String>> {
        self.position(key).map(|index| self.text_at(index)).transpose()
    }

    /// Entry at a position in stored order
    pub fn entry(&self, index: usize) -> ZldResult<ZldEntry> {
        let key = self.keys.get(index).ok_or(ZldError::EntryOutOfRange {
            index,
            count: self.keys.len(),
        })?;
        Ok(ZldEntry::new(key.clone(), self.text_at(index)?))
    }

    /// Keys starting with `prefix`, case-sensitive, in stored order
    pub fn prefix_search(&self, prefix: &str) -> Vec<&str> {
        if !self.sorted {
            return self
                .keys()
                .filter(|key| key.starts_with(prefix))
                .collect();
        }
        let start = self.keys.partition_point(|key| key.as_str() < prefix);
        self.keys[start..]
            .iter()
            .take_while(|key| key.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Keys starting with `prefix`, ignoring case
    pub fn prefix_search_ignore_case(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_uppercase();
        self.keys()
            .filter(|key| key.to_uppercase().starts_with(&prefix))
            .collect()
    }

    fn text_at(&self, index: usize) -> ZldResult<String> {
        let location = self.locations.get(index).ok_or(ZldError::EntryOutOfRange {
            index,
            count: self.locations.len(),
        })?;
        let entry = self
            .blocks
            .get(location.block as usize)
            .ok_or(BlockError::BlockOutOfRange {
                block: location.block,
                count: self.blocks.len(),
            })?;

        // Frames carry no uncompressed size, so inflate without the size check
        let compressed = byte_range(&self.data, u64::from(entry.offset), u64::from(entry.compressed_size))?;
        let block = inflate(compressed)?;
        let start = location.offset as usize;
        let tail = block.get(start..).ok_or(BlockError::SliceOutOfRange {
            offset: u64::from(location.offset),
            size: 0,
            len: block.len(),
        })?;
        let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
        Ok(self.encoding.decode(&tail[..end]))
    }
}

/// Walk the `.zdt` size-prefixed block frames
fn parse_block_frames(data: &[u8]) -> ZldResult<Vec<BlockEntry>> {
    let mut blocks = Vec::new();
    let mut cursor = Cursor::new(data);

    while (cursor.position() as usize) < data.len() {
        let position = cursor.position() as usize;
        let truncated = || ZldError::Truncated {
            file: "definition data",
            offset: position,
        };
        let header = FrameHeader::read(&mut cursor).map_err(|_| truncated())?;
        let payload_start = position + FrameHeader::SIZE;
        byte_range(data, payload_start as u64, u64::from(header.size)).map_err(|_| truncated())?;

        blocks.push(BlockEntry {
            offset: u32::try_from(payload_start).map_err(|_| BlockError::TooLarge {
                what: "definition data",
                size: payload_start,
            })?,
            compressed_size: header.size,
            uncompressed_size: 0,
        });
        cursor.set_position((payload_start + header.size as usize) as u64);
    }

    debug!("Found {} definition blocks", blocks.len());
    Ok(blocks)
}
