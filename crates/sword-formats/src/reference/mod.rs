//! Bible reference parsing
//!
//! Two grammars are accepted:
//!
//! - OSIS: `Gen.1.1`, `Matt.5.3-12`, `John.3.16-4.5`, `Matt.5.3-Matt.5.12`
//! - Human-readable: `Genesis 1:1`, `1 John 2:3-5`, `John 3:16-4:5`
//!
//! OSIS is tried first. Book names in the human form go through the
//! abbreviation table in [`books`].

pub mod books;
mod error;
mod parser;

pub use books::{book_index, is_nt_book, lookup_book, normalize_book_name};
pub use error::{ReferenceError, ReferenceResult};

use std::fmt;
use std::str::FromStr;

/// A verse or verse range
///
/// `chapter_end` is only set for ranges that cross a chapter boundary;
/// `verse_end` is set for every range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Canonical OSIS book id
    pub book: String,
    /// Chapter, 1-based
    pub chapter: u16,
    /// Verse, 1-based
    pub verse: u16,
    /// Last chapter of a cross-chapter range
    pub chapter_end: Option<u16>,
    /// Last verse of a range
    pub verse_end: Option<u16>,
}

impl Reference {
    /// Single-verse reference
    pub fn new(book: impl Into<String>, chapter: u16, verse: u16) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
            chapter_end: None,
            verse_end: None,
        }
    }

    /// Parse either grammar
    pub fn parse(input: &str) -> ReferenceResult<Self> {
        parser::parse_reference(input)
    }

    /// Whether the reference spans more than one verse
    pub fn is_range(&self) -> bool {
        self.verse_end.is_some() || self.chapter_end.is_some()
    }

    /// First verse of the reference
    pub fn start(&self) -> Self {
        Self::new(self.book.clone(), self.chapter, self.verse)
    }

    /// Last verse of the reference
    pub fn end(&self) -> Self {
        Self::new(
            self.book.clone(),
            self.chapter_end.unwrap_or(self.chapter),
            self.verse_end.unwrap_or(self.verse),
        )
    }

    /// Check the numbering invariants
    pub fn validate(&self) -> ReferenceResult<()> {
        let invalid = |reason| ReferenceError::InvalidRange {
            reference: self.to_osis(),
            reason,
        };

        if self.chapter == 0 || self.verse == 0 {
            return Err(invalid("chapter and verse start at 1"));
        }

        match (self.chapter_end, self.verse_end) {
            (Some(_), None) => Err(invalid("chapter range without an end verse")),
            (Some(chapter_end), Some(verse_end)) => {
                if chapter_end < self.chapter {
                    Err(invalid("range ends in an earlier chapter"))
                } else if chapter_end == self.chapter && verse_end < self.verse {
                    Err(invalid("range ends before it starts"))
                } else if verse_end == 0 {
                    Err(invalid("chapter and verse start at 1"))
                } else {
                    Ok(())
                }
            }
            (None, Some(verse_end)) if verse_end < self.verse => {
                Err(invalid("range ends before it starts"))
            }
            _ => Ok(()),
        }
    }

    /// Canonical OSIS form
    pub fn to_osis(&self) -> String {
        let mut osis = format!("{}.{}.{}", self.book, self.chapter, self.verse);
        match (self.chapter_end, self.verse_end) {
            (Some(chapter_end), Some(verse_end)) => {
                osis.push_str(&format!("-{chapter_end}.{verse_end}"));
            }
            (None, Some(verse_end)) => osis.push_str(&format!("-{verse_end}")),
            _ => {}
        }
        osis
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_osis())
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_osis_display() {
        assert_eq!(Reference::new("Gen", 1, 1).to_string(), "Gen.1.1");

        let range = Reference::parse("Matt.5.3-12").expect("parse");
        assert_eq!(range.to_osis(), "Matt.5.3-12");

        let cross = Reference::parse("John 3:16-4:5").expect("parse");
        assert_eq!(cross.to_osis(), "John.3.16-4.5");
    }

    #[test]
    fn test_start_and_end() {
        let cross = Reference::parse("John.3.16-4.5").expect("parse");
        assert_eq!(cross.start(), Reference::new("John", 3, 16));
        assert_eq!(cross.end(), Reference::new("John", 4, 5));
        assert!(cross.is_range());
        assert!(!cross.start().is_range());
    }

    #[test]
    fn test_validate() {
        assert!(Reference::new("Gen", 1, 1).validate().is_ok());
        assert!(Reference::new("Gen", 0, 1).validate().is_err());
        assert!(Reference::new("Gen", 1, 0).validate().is_err());

        let mut backwards = Reference::new("Gen", 1, 5);
        backwards.verse_end = Some(3);
        assert!(backwards.validate().is_err());

        let mut cross = Reference::new("John", 3, 16);
        cross.chapter_end = Some(4);
        cross.verse_end = Some(5);
        assert!(cross.validate().is_ok());

        cross.chapter_end = Some(2);
        assert!(cross.validate().is_err());
    }

    #[test]
    fn test_from_str() {
        let reference: Reference = "Gen.1.1".parse().expect("parse");
        assert_eq!(reference, Reference::new("Gen", 1, 1));
    }
}
