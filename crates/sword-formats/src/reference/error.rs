//! Reference error types

use thiserror::Error;

/// Errors raised while parsing a reference or mapping it onto a versification
///
/// All of these are recoverable: the caller may retry with a corrected
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// Neither the OSIS nor the human-readable grammar matched
    #[error("unable to parse reference: {0:?}")]
    Unparsable(String),

    /// The book text is not in the abbreviation table
    #[error("unknown book: {0:?}")]
    UnknownBook(String),

    /// Chapter or verse zero, or a range ending before it starts
    #[error("invalid reference {reference}: {reason}")]
    InvalidRange {
        /// Reference as given
        reference: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The book belongs to the other testament
    #[error("book {book} is not in the {} testament", testament_name(.expected_nt))]
    TestamentMismatch {
        /// OSIS book id
        book: String,
        /// Testament that was requested
        expected_nt: bool,
    },

    /// The versification has no such book
    #[error("book {book} is not part of the {versification} versification")]
    BookNotInVersification {
        /// OSIS book id
        book: String,
        /// Versification name
        versification: String,
    },

    /// Chapter beyond the book's chapter count
    #[error("{book} has {max} chapters, requested chapter {chapter}")]
    ChapterOutOfRange {
        /// OSIS book id
        book: String,
        /// Requested chapter
        chapter: u16,
        /// Chapter count of the book
        max: u16,
    },

    /// Verse beyond the chapter's verse count
    #[error("{book} {chapter} has {max} verses, requested verse {verse}")]
    VerseOutOfRange {
        /// OSIS book id
        book: String,
        /// Chapter number
        chapter: u16,
        /// Requested verse
        verse: u16,
        /// Verse count of the chapter
        max: u16,
    },

    /// Index addresses a module, book or chapter header slot
    #[error("index {0} is a header slot, not a verse")]
    HeaderSlot(u32),

    /// Index beyond the testament's slot count
    #[error("index {index} is beyond the {slots} slots of this testament")]
    IndexOutOfRange {
        /// Requested index
        index: u32,
        /// Slot count of the testament
        slots: u32,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn testament_name(is_nt: &bool) -> &'static str {
    if *is_nt { "new" } else { "old" }
}

/// Result type for reference operations
pub type ReferenceResult<T> = Result<T, ReferenceError>;
