//! RawGenBook hierarchical general books
//!
//! A general book is a tree of named nodes stored in three files sharing a
//! path stem:
//!
//! - `.bdt`: per node, little-endian `i32` parent, first child and next
//!   sibling ordinals (`-1` for none) followed by the NUL-terminated name
//! - `.idx`: `u32` offset and size of content in `.dat`, either one record
//!   per node or, in the compact layout, one per leaf in depth-first order
//! - `.dat`: concatenated node content
//!
//! Links refer to nodes by ordinal; node 0 is the unnamed root.

mod error;
mod reader;
mod tree;
mod writer;

pub use error::{GenBookError, GenBookResult};
pub use reader::GenBookReader;
pub use tree::{DataEntry, NO_LINK, TreeKey, TreePaths, path_segments};
pub use writer::GenBookWriter;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::block::{read_table, write_table};
    use crate::conf::ConfRecord;
    use pretty_assertions::assert_eq;

    fn confession() -> (tempfile::TempDir, GenBookReader) {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("wcf");
        let mut writer = GenBookWriter::new();
        writer.put("/WCF/Chapter 1/Article 1", "Although the light of nature").expect("put");
        writer.put("/WCF/Chapter 1/Article 2", "Under the name of Holy Scripture").expect("put");
        writer.put("/WCF/Chapter 2/Article 1", "There is but one only").expect("put");
        writer.put("/WCF", "Westminster Confession of Faith").expect("put");
        writer.write_module(&stem).expect("write");

        let conf = ConfRecord::parse_str("[WCF]\nModDrv=RawGenBook\n");
        let reader = GenBookReader::open(&conf, &stem).expect("open");
        (dir, reader)
    }

    #[test]
    fn test_tree_shape() {
        let (_dir, reader) = confession();
        // root, WCF, Chapter 1, Article 1, Article 2, Chapter 2, Article 1
        assert_eq!(reader.len(), 7);
        assert_eq!(reader.node(0).unwrap().name, "");
        assert_eq!(reader.node(0).unwrap().parent, NO_LINK);
        assert_eq!(reader.children(0).unwrap(), vec![1]);
        assert_eq!(reader.children(1).unwrap(), vec![2, 5]);
        assert_eq!(reader.children(2).unwrap(), vec![3, 4]);
        assert!(reader.children(3).unwrap().is_empty());
    }

    #[test]
    fn test_paths_and_content() {
        let (_dir, reader) = confession();
        let index = reader.find("/WCF/Chapter 1/Article 2").unwrap().expect("node");
        assert_eq!(reader.path_of(index).unwrap(), "/WCF/Chapter 1/Article 2");
        assert_eq!(
            reader.content(index).unwrap().as_deref(),
            Some("Under the name of Holy Scripture")
        );
        assert_eq!(
            reader.content_at("/WCF").unwrap().as_deref(),
            Some("Westminster Confession of Faith")
        );
        assert_eq!(reader.content_at("/WCF/Chapter 1").unwrap(), None);
        assert_eq!(reader.find("/WCF/Chapter 9").unwrap(), None);
        assert_eq!(reader.find("/").unwrap(), Some(0));
        assert_eq!(reader.path_of(0).unwrap(), "/");
    }

    #[test]
    fn test_traverse_is_depth_first() {
        let (_dir, reader) = confession();
        let paths: Vec<_> = reader
            .traverse()
            .unwrap()
            .into_iter()
            .map(|i| reader.path_of(i).unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/WCF",
                "/WCF/Chapter 1",
                "/WCF/Chapter 1/Article 1",
                "/WCF/Chapter 1/Article 2",
                "/WCF/Chapter 2",
                "/WCF/Chapter 2/Article 1",
            ]
        );
    }

    #[test]
    fn test_put_replaces_content() {
        let mut writer = GenBookWriter::new();
        let first = writer.put("/A/B", "one").expect("put");
        let second = writer.put("A/B/", "two").expect("put");
        assert_eq!(first, second);
        assert_eq!(writer.len(), 3);

        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("book");
        assert_eq!(writer.write_module(&stem).expect("write"), 1);
        let conf = ConfRecord::parse_str("[B]\nModDrv=RawGenBook\n");
        let reader = GenBookReader::open(&conf, &stem).expect("open");
        assert_eq!(reader.content_at("/A/B").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_bad_link_rejected() {
        let (dir, _reader) = confession();
        let bdt = dir.path().join("wcf.bdt");
        let mut bytes = std::fs::read(&bdt).expect("read");
        // First child of the root points past the tree
        bytes[4..8].copy_from_slice(&99i32.to_le_bytes());
        std::fs::write(&bdt, bytes).expect("write");

        let conf = ConfRecord::parse_str("[WCF]\nModDrv=RawGenBook\n");
        assert!(matches!(
            GenBookReader::open(&conf, dir.path().join("wcf")),
            Err(GenBookError::BadLink { node: 0, link: 99 })
        ));
    }

    #[test]
    fn test_compact_index_maps_leaves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("lc");
        let mut writer = GenBookWriter::new();
        writer.put("/Q1/Answer", "Man's chief end").expect("put");
        writer.put("/Q1/Proof", "1 Cor. 10:31").expect("put");
        writer.put("/Q2/Answer", "The word of God").expect("put");
        writer.write_module(&stem).expect("write");

        // root 0, Q1 1, Answer 2, Proof 3, Q2 4, Answer 5: keep leaf records only
        let idx = dir.path().join("lc.idx");
        let full: Vec<DataEntry> = read_table(&std::fs::read(&idx).expect("read")).expect("table");
        let compact = vec![full[2], full[3], full[5]];
        std::fs::write(&idx, write_table(&compact).expect("table")).expect("write");

        let conf = ConfRecord::parse_str("[LC]\nModDrv=RawGenBook\n");
        let reader = GenBookReader::open(&conf, &stem).expect("open");
        assert_eq!(reader.len(), 6);
        assert_eq!(reader.content_at("/Q1").unwrap(), None);
        assert_eq!(reader.content_at("/Q1/Proof").unwrap().as_deref(), Some("1 Cor. 10:31"));
        assert_eq!(reader.content_at("/Q2/Answer").unwrap().as_deref(), Some("The word of God"));
    }

    #[test]
    fn test_count_mismatch() {
        let (dir, _reader) = confession();
        std::fs::write(dir.path().join("wcf.idx"), [0u8; 16]).expect("write");
        let conf = ConfRecord::parse_str("[WCF]\nModDrv=RawGenBook\n");
        assert!(matches!(
            GenBookReader::open(&conf, dir.path().join("wcf")),
            Err(GenBookError::CountMismatch { nodes: 7, records: 2 })
        ));
    }
}
