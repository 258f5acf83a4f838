//! zText/zCom module writer

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{VerseStoreError, VerseStoreResult};
use super::index::VerseEntry;
use super::store::Testament;
use crate::block::{BlockWriter, write_table};
use crate::reference::Reference;
use crate::versification::Versification;

/// How often the writer closes a compressed block
///
/// SWORD calls this the module's `BlockType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockGranularity {
    /// One block per testament
    #[default]
    Testament,
    /// One block per book
    Book,
    /// One block per chapter
    Chapter,
}

impl BlockGranularity {
    /// `BlockType` conf value
    pub const fn conf_value(self) -> &'static str {
        match self {
            Self::Testament => "TESTAMENT",
            Self::Book => "BOOK",
            Self::Chapter => "CHAPTER",
        }
    }

    /// Parse a `BlockType` conf value, defaulting to per-testament blocks
    pub fn from_conf_value(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "BOOK" => Self::Book,
            "CHAPTER" | "VERSE" => Self::Chapter,
            _ => Self::Testament,
        }
    }
}

/// Files written for one testament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestamentSummary {
    /// Verse index records
    pub slots: usize,
    /// Compressed blocks
    pub blocks: usize,
    /// Slots with text
    pub verses: usize,
}

/// Result of [`ZTextWriter::write_module`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    /// Old Testament files, if written
    pub old: Option<TestamentSummary>,
    /// New Testament files, if written
    pub new: Option<TestamentSummary>,
}

impl WriteSummary {
    /// Verses written across both testaments
    pub fn verses(&self) -> usize {
        self.old.map_or(0, |t| t.verses) + self.new.map_or(0, |t| t.verses)
    }
}

/// Collects verse text in memory and writes `.bzs`/`.bzv`/`.bzz` files
///
/// Verses may be put in any order; the module is always laid out in
/// versification order. A testament without any verse is not written.
#[derive(Debug)]
pub struct ZTextWriter {
    versification: &'static Versification,
    granularity: BlockGranularity,
    verses: BTreeMap<(Testament, u32), String>,
}

impl ZTextWriter {
    /// Writer for a versification with per-testament blocks
    pub fn new(versification: &'static Versification) -> Self {
        Self {
            versification,
            granularity: BlockGranularity::default(),
            verses: BTreeMap::new(),
        }
    }

    /// Set the block granularity
    #[must_use]
    pub const fn with_granularity(mut self, granularity: BlockGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Versification the module is laid out in
    pub const fn versification(&self) -> &'static Versification {
        self.versification
    }

    /// Block granularity in use
    pub const fn granularity(&self) -> BlockGranularity {
        self.granularity
    }

    /// Number of verses put so far
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether no verse has been put
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Set the text of a verse, replacing any earlier text
    ///
    /// Only the first verse of a range is addressed.
    pub fn put_verse(&mut self, reference: &Reference, text: impl Into<String>) -> VerseStoreResult<()> {
        let text = text.into();
        if text.len() > usize::from(u16::MAX) {
            return Err(VerseStoreError::VerseTooLong {
                reference: reference.to_osis(),
                size: text.len(),
            });
        }

        let is_nt = self
            .versification
            .is_nt_book(&reference.book)
            .unwrap_or_default();
        let index = self.versification.calculate_index(reference, is_nt)?;
        self.verses.insert((Testament::from_is_nt(is_nt), index), text);
        Ok(())
    }

    /// Write the module's index and data files into `dir`
    pub fn write_module(&self, dir: impl AsRef<Path>) -> VerseStoreResult<WriteSummary> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(VerseStoreError::io(dir))?;

        let mut summary = WriteSummary::default();
        for testament in Testament::ALL {
            let has_verses = self.verses.range((testament, 0)..=(testament, u32::MAX)).next().is_some();
            if !has_verses {
                debug!("Skipping empty {} in {}", testament, dir.display());
                continue;
            }
            let written = self.write_testament(dir, testament)?;
            match testament {
                Testament::Old => summary.old = Some(written),
                Testament::New => summary.new = Some(written),
            }
        }

        info!(
            "Wrote verse module {} ({} verses, {} granularity)",
            dir.display(),
            summary.verses(),
            self.granularity.conf_value()
        );
        Ok(summary)
    }

    fn write_testament(&self, dir: &Path, testament: Testament) -> VerseStoreResult<TestamentSummary> {
        let slots = self.versification.testament_slot_count(testament.is_nt()) as usize;
        let mut entries = Vec::with_capacity(slots);
        let mut blocks = BlockWriter::unbounded();
        let mut verses = 0;

        // Module and testament heading slots
        let mut index = 0u32;
        for _ in 0..2 {
            entries.push(self.append_slot(&mut blocks, testament, index)?);
            index += 1;
        }

        for book in self.versification.testament_books(testament.is_nt()) {
            entries.push(self.append_slot(&mut blocks, testament, index)?);
            index += 1;

            for &verse_count in &book.chapters {
                entries.push(self.append_slot(&mut blocks, testament, index)?);
                index += 1;

                for _ in 0..verse_count {
                    let entry = self.append_slot(&mut blocks, testament, index)?;
                    verses += usize::from(!entry.is_empty());
                    entries.push(entry);
                    index += 1;
                }

                if self.granularity == BlockGranularity::Chapter {
                    blocks.flush()?;
                }
            }

            if self.granularity == BlockGranularity::Book {
                blocks.flush()?;
            }
        }

        let finished = blocks.finish()?;
        let write = |path: std::path::PathBuf, bytes: &[u8]| {
            std::fs::write(&path, bytes).map_err(VerseStoreError::io(path))
        };
        write(testament.block_index_path(dir), &write_table(&finished.blocks)?)?;
        write(testament.verse_index_path(dir), &write_table(&entries)?)?;
        write(testament.data_path(dir), &finished.data)?;

        debug!(
            "Wrote {} index: {} slots, {} blocks",
            testament.prefix(),
            entries.len(),
            finished.blocks.len()
        );
        Ok(TestamentSummary {
            slots: entries.len(),
            blocks: finished.blocks.len(),
            verses,
        })
    }

    fn append_slot(
        &self,
        blocks: &mut BlockWriter,
        testament: Testament,
        index: u32,
    ) -> VerseStoreResult<VerseEntry> {
        let text = self
            .verses
            .get(&(testament, index))
            .map_or(&[][..], |text| text.as_bytes());
        let location = blocks.append(text)?;
        VerseEntry::try_from(location).map_err(|_| VerseStoreError::VerseTooLong {
            reference: format!("{} slot {index}", testament.prefix()),
            size: text.len(),
        })
    }
}
