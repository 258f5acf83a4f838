//! OSIS and human-readable reference grammars

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::books::lookup_book;
use super::error::{ReferenceError, ReferenceResult};
use super::Reference;

#[allow(clippy::expect_used)]
static OSIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([1-4]?[A-Za-z]+)\.(\d+)\.(\d+)(?:-(?:([1-4]?[A-Za-z]+)\.)?(?:(\d+)\.)?(\d+))?$",
    )
    .expect("OSIS reference grammar is valid")
});

#[allow(clippy::expect_used)]
static HUMAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:[1-4]\s*)?[A-Za-z][A-Za-z .]*?)\.?\s*(\d+):(\d+)(?:\s*-\s*(?:(\d+):)?(\d+))?$",
    )
    .expect("human reference grammar is valid")
});

/// Parse a reference, OSIS first, then human-readable
pub(super) fn parse_reference(input: &str) -> ReferenceResult<Reference> {
    let input = input.trim();
    let mut unknown_osis_book = None;

    if let Some(caps) = OSIS.captures(input) {
        match lookup_book(&caps[1]) {
            Some(book) => {
                if let Some(end_book) = caps.get(4) {
                    if lookup_book(end_book.as_str()) != Some(book) {
                        return Err(ReferenceError::InvalidRange {
                            reference: input.to_string(),
                            reason: "ranges may not cross books",
                        });
                    }
                }
                return build(input, book, &caps, 2, 3, 5, 6);
            }
            None => unknown_osis_book = Some(caps[1].to_string()),
        }
    }

    if let Some(caps) = HUMAN.captures(input) {
        let book_text = caps[1].trim();
        let book =
            lookup_book(book_text).ok_or_else(|| ReferenceError::UnknownBook(book_text.to_string()))?;
        return build(input, book, &caps, 2, 3, 4, 5);
    }

    match unknown_osis_book {
        Some(book) => Err(ReferenceError::UnknownBook(book)),
        None => Err(ReferenceError::Unparsable(input.to_string())),
    }
}

/// Assemble a reference from capture groups
fn build(
    input: &str,
    book: &str,
    caps: &Captures<'_>,
    chapter: usize,
    verse: usize,
    chapter_end: usize,
    verse_end: usize,
) -> ReferenceResult<Reference> {
    let number = |group: usize| -> ReferenceResult<Option<u16>> {
        caps.get(group)
            .map(|m| {
                m.as_str()
                    .parse::<u16>()
                    .map_err(|_| ReferenceError::Unparsable(input.to_string()))
            })
            .transpose()
    };

    let chapter = number(chapter)?.unwrap_or_default();
    let verse = number(verse)?.unwrap_or_default();
    let chapter_end = number(chapter_end)?.filter(|&end| end != chapter);

    let reference = Reference {
        book: book.to_string(),
        chapter,
        verse,
        chapter_end,
        verse_end: number(verse_end)?,
    };
    reference.validate()?;
    Ok(reference)
}
