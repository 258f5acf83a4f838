//! Verse index record

use binrw::{BinRead, BinWrite};

use crate::block::{EntryLocation, FixedRecord};

/// Location of one verse slot's text
///
/// Encoded as 10 little-endian bytes in `.bzv` files. A size of zero marks
/// an empty slot; its block and offset are not meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct VerseEntry {
    /// Block number in the testament's block index
    pub block: u32,
    /// Offset within the decompressed block
    pub offset: u32,
    /// Text length in bytes
    pub size: u16,
}

impl FixedRecord for VerseEntry {
    const SIZE: usize = 10;
    const TABLE: &'static str = "verse index";
}

impl VerseEntry {
    /// Whether the slot has no text
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl TryFrom<EntryLocation> for VerseEntry {
    type Error = std::num::TryFromIntError;

    fn try_from(location: EntryLocation) -> Result<Self, Self::Error> {
        Ok(Self {
            block: location.block,
            offset: location.offset,
            size: u16::try_from(location.size)?,
        })
    }
}
