//! zCom compressed commentary modules
//!
//! A zCom module is byte-for-byte a zText module. Commentaries leave most
//! verse slots empty, so lookups here report an empty slot as "no entry"
//! and the aggregate queries skip empty slots.

use std::path::Path;

use crate::conf::ConfRecord;
use crate::reference::{Reference, ReferenceError};
use crate::versification::Versification;
use crate::ztext::{BlockGranularity, VerseStoreResult, WriteSummary, ZTextReader, ZTextWriter};

/// A commentary entry and the verse it comments on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryEntry {
    /// Verse the entry is attached to
    pub reference: Reference,
    /// Entry text
    pub text: String,
}

/// Reads commentary entries from a zCom module
#[derive(Debug)]
pub struct ZComReader {
    inner: ZTextReader,
}

impl ZComReader {
    /// Open the module files in `dir`
    pub fn open(conf: &ConfRecord, dir: impl AsRef<Path>, cache_capacity: usize) -> VerseStoreResult<Self> {
        Ok(Self {
            inner: ZTextReader::open(conf, dir, cache_capacity)?,
        })
    }

    /// Verse-level access to the same files
    pub const fn verses(&self) -> &ZTextReader {
        &self.inner
    }

    /// Versification the module is indexed by
    pub const fn versification(&self) -> &'static Versification {
        self.inner.versification()
    }

    /// Entry attached to a verse, `None` for an empty slot
    pub fn entry(&self, reference: &Reference) -> VerseStoreResult<Option<String>> {
        let text = self.inner.verse_text(reference)?;
        Ok((!text.is_empty()).then_some(text))
    }

    /// Every non-empty entry of a chapter in verse order
    pub fn chapter_entries(&self, book: &str, chapter: u16) -> VerseStoreResult<Vec<CommentaryEntry>> {
        let v11n = self.versification();
        let verses = v11n
            .verse_count(book, chapter)
            .ok_or_else(|| chapter_error(v11n, book, chapter))?;

        let mut entries = Vec::new();
        for verse in 1..=verses {
            let reference = Reference::new(book, chapter, verse);
            if let Some(text) = self.entry(&reference)? {
                entries.push(CommentaryEntry { reference, text });
            }
        }
        Ok(entries)
    }

    /// Every non-empty entry of a book in chapter and verse order
    pub fn book_entries(&self, book: &str) -> VerseStoreResult<Vec<CommentaryEntry>> {
        let v11n = self.versification();
        let chapters = v11n
            .chapter_count(book)
            .ok_or_else(|| chapter_error(v11n, book, 1))?;

        let mut entries = Vec::new();
        for chapter in 1..=chapters {
            entries.extend(self.chapter_entries(book, chapter)?);
        }
        Ok(entries)
    }
}

fn chapter_error(v11n: &Versification, book: &str, chapter: u16) -> ReferenceError {
    match v11n.chapter_count(book) {
        Some(max) => ReferenceError::ChapterOutOfRange {
            book: book.to_string(),
            chapter,
            max,
        },
        None => ReferenceError::BookNotInVersification {
            book: book.to_string(),
            versification: v11n.name().to_string(),
        },
    }
}

/// Writes a zCom module
#[derive(Debug)]
pub struct ZComWriter {
    inner: ZTextWriter,
}

impl ZComWriter {
    /// Writer for a versification
    pub fn new(versification: &'static Versification) -> Self {
        Self {
            inner: ZTextWriter::new(versification),
        }
    }

    /// Set the block granularity
    #[must_use]
    pub fn with_granularity(self, granularity: BlockGranularity) -> Self {
        Self {
            inner: self.inner.with_granularity(granularity),
        }
    }

    /// Attach an entry to a verse, replacing any earlier entry
    pub fn put_entry(&mut self, reference: &Reference, text: impl Into<String>) -> VerseStoreResult<()> {
        self.inner.put_verse(reference, text)
    }

    /// Number of entries put so far
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no entry has been put
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Block granularity in use
    pub const fn granularity(&self) -> BlockGranularity {
        self.inner.granularity()
    }

    /// Versification the writer lays entries out in
    pub const fn versification(&self) -> &'static Versification {
        self.inner.versification()
    }

    /// Write the module files into `dir`
    pub fn write_module(&self, dir: impl AsRef<Path>) -> VerseStoreResult<WriteSummary> {
        self.inner.write_module(dir)
    }
}
