//! zLD dictionary writer

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;

use binrw::BinWrite;
use tracing::info;

use super::entry::{DictionaryPaths, FrameHeader, ZdxEntry, ZldEntry, build_key_files};
use super::error::{ZldError, ZldResult};
use crate::block::{BlockError, BlockWriter, DICTIONARY_BLOCK_SIZE, write_table};

/// Files written by [`ZldWriter::write_module`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DictionarySummary {
    /// Entries written
    pub entries: usize,
    /// Compressed blocks written
    pub blocks: usize,
}

/// Collects dictionary entries in memory and writes the four zLD files
///
/// Entries are sorted by key (byte order) when written; readers rely on
/// that order. Putting a key twice replaces the earlier definition.
#[derive(Debug, Default)]
pub struct ZldWriter {
    entries: Vec<ZldEntry>,
    positions: HashMap<String, usize>,
    block_size: usize,
}

impl ZldWriter {
    /// Writer with the standard 4 KiB block threshold
    pub fn new() -> Self {
        Self::with_block_size(DICTIONARY_BLOCK_SIZE)
    }

    /// Writer with a custom block threshold
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size,
            ..Self::default()
        }
    }

    /// Add or replace an entry
    pub fn put(&mut self, key: impl Into<String>, text: impl Into<String>) -> ZldResult<()> {
        let entry = ZldEntry::new(key, text);
        if entry.key.as_bytes().contains(&0) {
            return Err(ZldError::InvalidKey(entry.key));
        }
        if entry.text.as_bytes().contains(&0) {
            return Err(ZldError::InvalidDefinition(entry.key));
        }
        match self.positions.get(&entry.key) {
            Some(&index) => self.entries[index] = entry,
            None => {
                self.positions.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
        Ok(())
    }

    /// Entries in their current order
    pub fn entries(&self) -> &[ZldEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been put
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort the entries and write `<stem>.idx/.dat/.zdx/.zdt`
    pub fn write_module(&mut self, stem: impl AsRef<Path>) -> ZldResult<DictionarySummary> {
        let stem = stem.as_ref();
        self.sort();

        let mut blocks = BlockWriter::with_threshold(self.block_size).nul_terminated(true);
        let mut locations = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let location = blocks.append(entry.text.as_bytes())?;
            locations.push(ZdxEntry {
                block: location.block,
                offset: location.offset,
            });
        }
        let finished = blocks.finish()?;

        let mut zdt = Cursor::new(Vec::with_capacity(
            finished.data.len() + finished.blocks.len() * FrameHeader::SIZE,
        ));
        for block in &finished.blocks {
            let start = block.offset as usize;
            let end = start + block.compressed_size as usize;
            FrameHeader {
                size: block.compressed_size,
            }
            .write(&mut zdt)
            .map_err(BlockError::from)?;
            zdt.write_all(&finished.data[start..end]).map_err(BlockError::from)?;
        }

        let keys: Vec<&str> = self.entries.iter().map(|e| e.key.as_str()).collect();
        let (idx, dat) = build_key_files(&keys)?;

        let paths = DictionaryPaths::new(stem);
        if let Some(parent) = paths.idx.parent() {
            std::fs::create_dir_all(parent).map_err(ZldError::io(parent))?;
        }
        let write = |path: &Path, bytes: &[u8]| std::fs::write(path, bytes).map_err(ZldError::io(path));
        write(&paths.idx, &idx)?;
        write(&paths.dat, &dat)?;
        write(&paths.zdx, &write_table(&locations)?)?;
        write(&paths.zdt, zdt.get_ref())?;

        info!(
            "Wrote zLD dictionary {} ({} entries, {} blocks)",
            stem.display(),
            self.entries.len(),
            finished.blocks.len()
        );
        Ok(DictionarySummary {
            entries: self.entries.len(),
            blocks: finished.blocks.len(),
        })
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.key.cmp(&b.key));
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();
    }
}
