//! Tree records of `.bdt` and `.idx` files

use std::io::Cursor;
use std::path::{Path, PathBuf};

use binrw::{BinRead, BinWrite, NullString};

use super::error::{GenBookError, GenBookResult};
use crate::block::FixedRecord;

/// Link value meaning "no node"
pub const NO_LINK: i32 = -1;

/// Link header and name of one tree node as stored in `.bdt`
///
/// Records are variable length and can only be read in sequence.
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
struct TreeRecord {
    parent: i32,
    first_child: i32,
    next_sibling: i32,
    name: NullString,
}

/// Content location of one node, 8 little-endian bytes in `.idx`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[br(little)]
#[bw(little)]
pub struct DataEntry {
    /// Offset into `.dat`
    pub offset: u32,
    /// Content length; zero for nodes without content
    pub size: u32,
}

impl FixedRecord for DataEntry {
    const SIZE: usize = 8;
    const TABLE: &'static str = "tree data index";
}

/// A node of a general book tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeKey {
    /// Node name, one path segment
    pub name: String,
    /// Parent ordinal or [`NO_LINK`]
    pub parent: i32,
    /// First child ordinal or [`NO_LINK`]
    pub first_child: i32,
    /// Next sibling ordinal or [`NO_LINK`]
    pub next_sibling: i32,
    /// Content offset in `.dat`
    pub offset: u32,
    /// Content length
    pub size: u32,
}

impl TreeKey {
    /// Whether the node carries content
    pub const fn has_content(&self) -> bool {
        self.size > 0
    }
}

/// Resolve a link to an ordinal
pub(super) fn link(value: i32) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Encode an ordinal as a link
pub(super) fn to_link(ordinal: Option<usize>) -> i32 {
    ordinal
        .and_then(|o| i32::try_from(o).ok())
        .unwrap_or(NO_LINK)
}

/// Parse every record of a `.bdt` file
pub(super) fn parse_tree(bytes: &[u8]) -> GenBookResult<Vec<(i32, i32, i32, Vec<u8>)>> {
    let mut cursor = Cursor::new(bytes);
    let mut records = Vec::new();
    let len = bytes.len() as u64;

    while cursor.position() < len {
        let start = cursor.position();
        let record = TreeRecord::read(&mut cursor).map_err(|_| GenBookError::Truncated(start))?;
        records.push((
            record.parent,
            record.first_child,
            record.next_sibling,
            record.name.0,
        ));
    }

    Ok(records)
}

/// Serialize one `.bdt` record
pub(super) fn write_record(
    out: &mut Cursor<Vec<u8>>,
    links: (i32, i32, i32),
    name: &str,
) -> GenBookResult<()> {
    TreeRecord {
        parent: links.0,
        first_child: links.1,
        next_sibling: links.2,
        name: NullString::from(name),
    }
    .write(out)
    .map_err(crate::block::BlockError::from)?;
    Ok(())
}

/// The three files of a general book sharing one path stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePaths {
    /// Tree, `<stem>.bdt`
    pub bdt: PathBuf,
    /// Data index, `<stem>.idx`
    pub idx: PathBuf,
    /// Content, `<stem>.dat`
    pub dat: PathBuf,
}

impl TreePaths {
    /// Paths for a stem such as `modules/genbook/rawgenbook/wcf/wcf`
    pub fn new(stem: &Path) -> Self {
        let with = |extension: &str| {
            let mut path = stem.as_os_str().to_owned();
            path.push(".");
            path.push(extension);
            PathBuf::from(path)
        };
        Self {
            bdt: with("bdt"),
            idx: with("idx"),
            dat: with("dat"),
        }
    }
}

/// Split a path into its non-empty segments
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        let mut out = Cursor::new(Vec::new());
        write_record(&mut out, (NO_LINK, 1, NO_LINK), "").expect("write");
        write_record(&mut out, (0, NO_LINK, NO_LINK), "WCF").expect("write");
        let bytes = out.into_inner();
        assert_eq!(bytes.len(), 13 + 16);
        assert_eq!(&bytes[..12], &[0xFF, 0xFF, 0xFF, 0xFF, 1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&bytes[25..], b"WCF\0");

        let records = parse_tree(&bytes).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], (NO_LINK, 1, NO_LINK, Vec::new()));
        assert_eq!(records[1].3, b"WCF");
    }

    #[test]
    fn test_truncated_records() {
        // Short link header
        assert!(matches!(parse_tree(&[0u8; 8]), Err(GenBookError::Truncated(0))));
        // Name without terminator
        let mut bytes = vec![0xFF; 12];
        bytes.extend_from_slice(b"abc");
        assert!(matches!(parse_tree(&bytes), Err(GenBookError::Truncated(0))));
    }

    #[test]
    fn test_links() {
        assert_eq!(link(NO_LINK), None);
        assert_eq!(link(3), Some(3));
        assert_eq!(to_link(None), NO_LINK);
        assert_eq!(to_link(Some(7)), 7);
    }

    #[test]
    fn test_path_segments() {
        let segments: Vec<_> = path_segments("/WCF//Chapter 1/").collect();
        assert_eq!(segments, vec!["WCF", "Chapter 1"]);
        assert_eq!(path_segments("/").count(), 0);
    }
}
