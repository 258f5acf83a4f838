//! zText module reader

use std::path::Path;

use tracing::info;

use super::error::{VerseStoreError, VerseStoreResult};
use super::store::{Testament, VerseStore};
use crate::conf::{ConfRecord, TextEncoding};
use crate::reference::{Reference, ReferenceError};
use crate::versification::Versification;

/// Reads verse text from a zText module
///
/// Lookups take `&self` and never mutate the indexes, so one reader can be
/// shared between threads.
#[derive(Debug)]
pub struct ZTextReader {
    store: VerseStore,
    versification: &'static Versification,
    encoding: TextEncoding,
}

impl ZTextReader {
    /// Open the module files in `dir`, laid out according to `conf`
    pub fn open(conf: &ConfRecord, dir: impl AsRef<Path>, cache_capacity: usize) -> VerseStoreResult<Self> {
        let dir = dir.as_ref();
        let store = VerseStore::open(dir, cache_capacity)?;
        let versification = Versification::from_conf(conf);
        info!(
            "Opened {} module '{}' at {} ({} versification)",
            conf.driver,
            conf.name,
            dir.display(),
            versification.name()
        );
        Ok(Self {
            store,
            versification,
            encoding: conf.text_encoding(),
        })
    }

    /// Versification the module is indexed by
    pub const fn versification(&self) -> &'static Versification {
        self.versification
    }

    /// Whether the module carries a testament
    pub fn has_testament(&self, testament: Testament) -> bool {
        self.store.has_testament(testament)
    }

    /// Underlying verse store
    pub const fn store(&self) -> &VerseStore {
        &self.store
    }

    /// Text of the first verse of a reference
    ///
    /// An empty slot yields an empty string.
    pub fn verse_text(&self, reference: &Reference) -> VerseStoreResult<String> {
        let (testament, index) = self.locate(reference)?;
        self.slot_text(testament, index)
    }

    /// Text of every non-empty verse of a reference, joined with spaces
    ///
    /// Ranges may cross chapter boundaries but not books.
    pub fn passage_text(&self, reference: &Reference) -> VerseStoreResult<String> {
        if !reference.is_range() {
            return self.verse_text(reference);
        }
        reference.validate()?;

        let (testament, first) = self.locate(&reference.start())?;
        let (_, last) = self.locate(&reference.end())?;

        let mut parts = Vec::new();
        for index in first..=last {
            // Chapter headings inside a range are not part of the passage
            if self.versification.index_to_ref(index, testament.is_nt()).is_err() {
                continue;
            }
            let text = self.slot_text(testament, index)?;
            if !text.is_empty() {
                parts.push(text);
            }
        }
        Ok(parts.join(" "))
    }

    /// Decoded text of a verse index slot
    pub fn slot_text(&self, testament: Testament, index: u32) -> VerseStoreResult<String> {
        let bytes = self.store.slot_bytes(testament, index)?;
        Ok(self.encoding.decode(&bytes))
    }

    /// Testament and slot of a reference's first verse
    pub fn locate(&self, reference: &Reference) -> VerseStoreResult<(Testament, u32)> {
        let is_nt = self.versification.is_nt_book(&reference.book).ok_or_else(|| {
            ReferenceError::BookNotInVersification {
                book: reference.book.clone(),
                versification: self.versification.name().to_string(),
            }
        })?;
        let testament = Testament::from_is_nt(is_nt);
        if !self.store.has_testament(testament) {
            return Err(VerseStoreError::MissingTestament(testament));
        }
        let index = self.versification.calculate_index(reference, is_nt)?;
        Ok((testament, index))
    }
}
