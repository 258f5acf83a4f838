//! zLD compressed lexicon and dictionary modules
//!
//! A dictionary is a flat, key-sorted store split over four files sharing a
//! path stem:
//!
//! - `.idx`: big-endian `u32` offset into `.dat`, then the key and a NUL
//! - `.dat`: every key followed by a NUL
//! - `.zdx`: little-endian block number and block offset per entry
//! - `.zdt`: little-endian `u32` size followed by a zlib block, repeated
//!
//! Definitions are NUL-terminated inside their block. Blocks are closed at
//! 4 KiB.

mod entry;
mod error;
mod reader;
mod writer;

pub use entry::{DictionaryPaths, KeyRecord, ZdxEntry, ZldEntry};
pub use error::{ZldError, ZldResult};
pub use reader::ZldReader;
pub use writer::{DictionarySummary, ZldWriter};

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::conf::ConfRecord;
    use pretty_assertions::assert_eq;

    fn conf() -> ConfRecord {
        ConfRecord::parse_str("[Dict]\nModDrv=zLD\n")
    }

    fn greek() -> (tempfile::TempDir, ZldReader) {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("dict");
        let mut writer = ZldWriter::new();
        writer.put("G3056", "logos: word").expect("put");
        writer.put("G26", "agape: love").expect("put");
        writer.put("G2316", "theos: God").expect("put");
        writer.put("H430", "elohim").expect("put");
        writer.put("G26", "agape: love, charity").expect("put");
        writer.write_module(&stem).expect("write");
        let reader = ZldReader::open(&conf(), &stem).expect("open");
        (dir, reader)
    }

    #[test]
    fn test_exact_lookup() {
        let (_dir, reader) = greek();
        assert_eq!(reader.len(), 4);
        assert_eq!(reader.get("G2316").unwrap().as_deref(), Some("theos: God"));
        assert_eq!(reader.get("G26").unwrap().as_deref(), Some("agape: love, charity"));
        assert_eq!(reader.get("g26").unwrap(), None);
        assert_eq!(reader.get("G9999").unwrap(), None);
    }

    #[test]
    fn test_keys_are_sorted() {
        let (dir, reader) = greek();
        let keys: Vec<_> = reader.keys().collect();
        assert_eq!(keys, vec!["G2316", "G26", "G3056", "H430"]);

        let dat = std::fs::read(dir.path().join("dict.dat")).expect("dat");
        assert_eq!(dat, b"G2316\0G26\0G3056\0H430\0");
    }

    #[test]
    fn test_writer_sorts_in_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut writer = ZldWriter::new();
        for key in ["beta", "alpha", "gamma", "Alpha"] {
            writer.put(key, key.to_uppercase()).expect("put");
        }
        writer.write_module(dir.path().join("dict")).expect("write");
        let keys: Vec<_> = writer.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["Alpha", "alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_prefix_search() {
        let (_dir, reader) = greek();
        assert_eq!(reader.prefix_search("G2"), vec!["G2316", "G26"]);
        assert_eq!(reader.prefix_search("H"), vec!["H430"]);
        assert!(reader.prefix_search("X").is_empty());
        assert!(reader.prefix_search("g2").is_empty());
        assert_eq!(reader.prefix_search_ignore_case("g2"), vec!["G2316", "G26"]);
    }

    #[test]
    fn test_entries_span_blocks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("dict");
        let mut writer = ZldWriter::new();
        for i in 0..200 {
            writer.put(format!("KEY{i:04}"), format!("definition {i} ").repeat(10)).expect("put");
        }
        let summary = writer.write_module(&stem).expect("write");
        assert!(summary.blocks > 1);

        let reader = ZldReader::open(&conf(), &stem).expect("open");
        let entry = reader.entry(199).expect("entry");
        assert_eq!(entry.key, "KEY0199");
        assert_eq!(entry.text, "definition 199 ".repeat(10));
        assert!(reader.entry(200).is_err());
    }

    #[test]
    fn test_count_mismatch() {
        let (dir, _reader) = greek();
        std::fs::write(dir.path().join("dict.zdx"), [0u8; 8]).expect("write");
        assert!(matches!(
            ZldReader::open(&conf(), dir.path().join("dict")),
            Err(ZldError::CountMismatch { keys: 4, entries: 1 })
        ));
    }

    #[test]
    fn test_truncated_definition_data() {
        let (dir, _reader) = greek();
        let zdt = dir.path().join("dict.zdt");
        let mut data = std::fs::read(&zdt).expect("read");
        data.truncate(data.len() - 1);
        std::fs::write(&zdt, data).expect("write");
        assert!(matches!(
            ZldReader::open(&conf(), dir.path().join("dict")),
            Err(ZldError::Truncated { .. })
        ));
    }

    #[test]
    fn test_short_frame_header() {
        let (dir, _reader) = greek();
        let zdt = dir.path().join("dict.zdt");
        let mut data = std::fs::read(&zdt).expect("read");
        data.extend_from_slice(&[7, 0]);
        std::fs::write(&zdt, data).expect("write");
        assert!(matches!(
            ZldReader::open(&conf(), dir.path().join("dict")),
            Err(ZldError::Truncated { file: "definition data", .. })
        ));
    }

    #[test]
    fn test_nul_in_definition_rejected() {
        let mut writer = ZldWriter::new();
        assert!(matches!(
            writer.put("G26", "agape\0love"),
            Err(ZldError::InvalidDefinition(key)) if key == "G26"
        ));
        assert!(matches!(writer.put("G\026", "love"), Err(ZldError::InvalidKey(_))));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_empty_dictionary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stem = dir.path().join("dict");
        ZldWriter::new().write_module(&stem).expect("write");
        let reader = ZldReader::open(&conf(), &stem).expect("open");
        assert!(reader.is_empty());
    }
}
