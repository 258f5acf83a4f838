//! Uniform reader/writer interface over the module formats
//!
//! Every format reader addresses its entries by a string key: an OSIS
//! reference for zText and zCom, the dictionary key for zLD and the node
//! path for RawGenBook. Writers take the same keys, which lets a caller
//! move content between formats without knowing which one it holds.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::block::BlockError;
use crate::conf::{ConfError, ConfRecord, ModuleKind};
use crate::genbook::{GenBookError, GenBookReader, GenBookWriter};
use crate::reference::{Reference, ReferenceError};
use crate::zcom::{ZComReader, ZComWriter};
use crate::zld::{ZldError, ZldReader, ZldWriter};
use crate::ztext::{Testament, VerseStoreError, ZTextReader, ZTextWriter};

/// Broad class of a codec failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Malformed index or data file
    Format,
    /// Slot, block, node or byte range outside the loaded tables
    Range,
    /// Reference that does not resolve; retry with a corrected one
    Reference,
    /// Driver or module kind without a codec
    Unsupported,
    /// File system failure
    Io,
    /// zlib failure
    Compression,
}

/// Any error raised by a module codec
#[derive(Debug, Error)]
pub enum CodecError {
    /// Conf file could not be read or written
    #[error(transparent)]
    Conf(#[from] ConfError),

    /// Reference error
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Block codec error
    #[error(transparent)]
    Block(#[from] BlockError),

    /// zText/zCom error
    #[error(transparent)]
    VerseStore(#[from] VerseStoreError),

    /// zLD error
    #[error(transparent)]
    Zld(#[from] ZldError),

    /// RawGenBook error
    #[error(transparent)]
    GenBook(#[from] GenBookError),

    /// No codec handles this driver
    #[error("unsupported module driver '{0}'")]
    Unsupported(String),
}

impl CodecError {
    /// Class of the failure
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Conf(_) => ErrorClass::Io,
            Self::Reference(_) => ErrorClass::Reference,
            Self::Block(e) => block_class(e),
            Self::VerseStore(e) => match e {
                VerseStoreError::NoTestamentData(_) | VerseStoreError::Io { .. } => ErrorClass::Io,
                VerseStoreError::MissingTestament(_)
                | VerseStoreError::SlotOutOfRange { .. }
                | VerseStoreError::VerseTooLong { .. } => ErrorClass::Range,
                VerseStoreError::Reference(_) => ErrorClass::Reference,
                VerseStoreError::Block(e) => block_class(e),
            },
            Self::Zld(e) => match e {
                ZldError::Truncated { .. }
                | ZldError::CountMismatch { .. }
                | ZldError::InvalidKey(_)
                | ZldError::InvalidDefinition(_) => ErrorClass::Format,
                ZldError::EntryOutOfRange { .. } => ErrorClass::Range,
                ZldError::Block(e) => block_class(e),
                ZldError::Io { .. } => ErrorClass::Io,
            },
            Self::GenBook(e) => match e {
                GenBookError::Truncated(_)
                | GenBookError::BadLink { .. }
                | GenBookError::Cycle(_)
                | GenBookError::CountMismatch { .. } => ErrorClass::Format,
                GenBookError::NodeOutOfRange { .. } => ErrorClass::Range,
                GenBookError::InvalidPath(_) => ErrorClass::Reference,
                GenBookError::Block(e) => block_class(e),
                GenBookError::Io { .. } => ErrorClass::Io,
            },
            Self::Unsupported(_) => ErrorClass::Unsupported,
        }
    }
}

fn block_class(error: &BlockError) -> ErrorClass {
    match error {
        BlockError::Misaligned { .. } | BlockError::BinRw(_) => ErrorClass::Format,
        BlockError::BlockOutOfRange { .. }
        | BlockError::SliceOutOfRange { .. }
        | BlockError::TooLarge { .. } => ErrorClass::Range,
        BlockError::Compression(_) => ErrorClass::Compression,
        BlockError::Io(_) => ErrorClass::Io,
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Options applied when opening a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Decompressed blocks memoised per zText/zCom module; 0 disables
    pub cache_capacity: usize,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self { cache_capacity: 16 }
    }
}

impl OpenOptions {
    /// Set the block cache capacity
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

/// Read access to an opened module
pub trait ModuleReader: Send + Sync {
    /// Open a module whose data lives at `data_path`
    ///
    /// `data_path` is a directory for zText/zCom and a file stem for zLD
    /// and RawGenBook.
    fn open(conf: &ConfRecord, data_path: &Path, options: &OpenOptions) -> CodecResult<Self>
    where
        Self: Sized;

    /// Kind of module this reader serves
    fn kind(&self) -> ModuleKind;

    /// Every entry key in module order
    fn entry_keys(&self) -> CodecResult<Vec<String>>;

    /// Text of an entry, `None` when the entry exists but is empty
    fn read_entry(&self, key: &str) -> CodecResult<Option<String>>;
}

/// A module written by [`ModuleWriter::finalize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenModule {
    /// Manifest written to `mods.d/`
    pub conf: ConfRecord,
    /// Location of the manifest
    pub conf_path: PathBuf,
    /// Data directory or file stem
    pub data_path: PathBuf,
    /// Entries with content
    pub entries: usize,
}

/// Write access to a module being built in memory
pub trait ModuleWriter {
    /// Kind of module this writer produces
    fn kind(&self) -> ModuleKind;

    /// Add or replace an entry
    fn write_entry(&mut self, key: &str, text: &str) -> CodecResult<()>;

    /// Write data files and manifest under a module root
    ///
    /// `template` supplies the module name and descriptive keys; the
    /// driver, data path and layout keys are set by the writer.
    fn finalize(&mut self, output_root: &Path, template: &ConfRecord) -> CodecResult<WrittenModule>;
}

fn verse_keys(reader: &ZTextReader) -> Vec<String> {
    let versification = reader.versification();
    Testament::ALL
        .into_iter()
        .filter(|&testament| reader.has_testament(testament))
        .flat_map(|testament| versification.references(testament.is_nt()))
        .map(|reference| reference.to_osis())
        .collect()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

impl ModuleReader for ZTextReader {
    fn open(conf: &ConfRecord, data_path: &Path, options: &OpenOptions) -> CodecResult<Self> {
        Ok(Self::open(conf, data_path, options.cache_capacity)?)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Bible
    }

    fn entry_keys(&self) -> CodecResult<Vec<String>> {
        Ok(verse_keys(self))
    }

    fn read_entry(&self, key: &str) -> CodecResult<Option<String>> {
        let reference = Reference::parse(key)?;
        Ok(non_empty(self.passage_text(&reference)?))
    }
}

impl ModuleReader for ZComReader {
    fn open(conf: &ConfRecord, data_path: &Path, options: &OpenOptions) -> CodecResult<Self> {
        Ok(Self::open(conf, data_path, options.cache_capacity)?)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Commentary
    }

    fn entry_keys(&self) -> CodecResult<Vec<String>> {
        Ok(verse_keys(self.verses()))
    }

    fn read_entry(&self, key: &str) -> CodecResult<Option<String>> {
        let reference = Reference::parse(key)?;
        Ok(self.entry(&reference)?)
    }
}

impl ModuleReader for ZldReader {
    fn open(conf: &ConfRecord, data_path: &Path, _options: &OpenOptions) -> CodecResult<Self> {
        Ok(Self::open(conf, data_path)?)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::Dictionary
    }

    fn entry_keys(&self) -> CodecResult<Vec<String>> {
        Ok(self.keys().map(str::to_string).collect())
    }

    fn read_entry(&self, key: &str) -> CodecResult<Option<String>> {
        Ok(self.get(key)?.and_then(non_empty))
    }
}

impl ModuleReader for GenBookReader {
    fn open(conf: &ConfRecord, data_path: &Path, _options: &OpenOptions) -> CodecResult<Self> {
        Ok(Self::open(conf, data_path)?)
    }

    fn kind(&self) -> ModuleKind {
        ModuleKind::GenBook
    }

    fn entry_keys(&self) -> CodecResult<Vec<String>> {
        let mut keys = Vec::with_capacity(self.len());
        if self.node(0).is_ok_and(|root| root.has_content()) {
            keys.push("/".to_string());
        }
        for index in self.traverse()? {
            keys.push(self.path_of(index)?);
        }
        Ok(keys)
    }

    fn read_entry(&self, key: &str) -> CodecResult<Option<String>> {
        Ok(self.content_at(key)?)
    }
}

impl ModuleWriter for ZTextWriter {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Bible
    }

    fn write_entry(&mut self, key: &str, text: &str) -> CodecResult<()> {
        Ok(self.put_verse(&Reference::parse(key)?, text)?)
    }

    fn finalize(&mut self, output_root: &Path, template: &ConfRecord) -> CodecResult<WrittenModule> {
        let (data_path, data_value) = data_location(ModuleKind::Bible, output_root, &template.name);
        let summary = self.write_module(&data_path)?;

        let mut conf = manifest(template, ModuleKind::Bible, &data_value);
        conf.set("CompressType", "ZIP");
        conf.set("BlockType", self.granularity().conf_value());
        conf.set("Versification", self.versification().system().id());
        write_manifest(conf, output_root, data_path, summary.verses())
    }
}

impl ModuleWriter for ZComWriter {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Commentary
    }

    fn write_entry(&mut self, key: &str, text: &str) -> CodecResult<()> {
        Ok(self.put_entry(&Reference::parse(key)?, text)?)
    }

    fn finalize(&mut self, output_root: &Path, template: &ConfRecord) -> CodecResult<WrittenModule> {
        let (data_path, data_value) = data_location(ModuleKind::Commentary, output_root, &template.name);
        let summary = self.write_module(&data_path)?;

        let mut conf = manifest(template, ModuleKind::Commentary, &data_value);
        conf.set("CompressType", "ZIP");
        conf.set("BlockType", self.granularity().conf_value());
        conf.set("Versification", self.versification().system().id());
        write_manifest(conf, output_root, data_path, summary.verses())
    }
}

impl ModuleWriter for ZldWriter {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Dictionary
    }

    fn write_entry(&mut self, key: &str, text: &str) -> CodecResult<()> {
        Ok(self.put(key, text)?)
    }

    fn finalize(&mut self, output_root: &Path, template: &ConfRecord) -> CodecResult<WrittenModule> {
        let (data_path, data_value) = data_location(ModuleKind::Dictionary, output_root, &template.name);
        let summary = self.write_module(&data_path)?;

        let mut conf = manifest(template, ModuleKind::Dictionary, &data_value);
        conf.set("CompressType", "ZIP");
        write_manifest(conf, output_root, data_path, summary.entries)
    }
}

impl ModuleWriter for GenBookWriter {
    fn kind(&self) -> ModuleKind {
        ModuleKind::GenBook
    }

    fn write_entry(&mut self, key: &str, text: &str) -> CodecResult<()> {
        self.put(key, text)?;
        Ok(())
    }

    fn finalize(&mut self, output_root: &Path, template: &ConfRecord) -> CodecResult<WrittenModule> {
        let (data_path, data_value) = data_location(ModuleKind::GenBook, output_root, &template.name);
        let entries = self.write_module(&data_path)?;
        let conf = manifest(template, ModuleKind::GenBook, &data_value);
        write_manifest(conf, output_root, data_path, entries)
    }
}

/// Data location on disk and as the conf `DataPath` value
fn data_location(kind: ModuleKind, output_root: &Path, name: &str) -> (PathBuf, String) {
    let relative = kind.data_subdir(name);
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let mut value = format!("./{}", segments.join("/"));
    if kind.is_versified() {
        value.push('/');
    }
    (output_root.join(relative), value)
}

/// Conf for a written module, derived from a template
fn manifest(template: &ConfRecord, kind: ModuleKind, data_path: &str) -> ConfRecord {
    let mut conf = template.clone();
    // Written data is plain UTF-8
    conf.properties
        .retain(|key, _| !key.eq_ignore_ascii_case("CipherKey") && !key.eq_ignore_ascii_case("Encoding"));
    conf.cipher_key.clear();
    conf.set("Encoding", "UTF-8");
    conf.set("ModDrv", kind.driver_name().unwrap_or_default());
    conf.set("DataPath", data_path);
    conf
}

fn write_manifest(
    conf: ConfRecord,
    output_root: &Path,
    data_path: PathBuf,
    entries: usize,
) -> CodecResult<WrittenModule> {
    let conf_path = output_root
        .join("mods.d")
        .join(format!("{}.conf", conf.name.to_ascii_lowercase()));
    conf.write_to(&conf_path)?;
    debug!("Wrote manifest {}", conf_path.display());
    info!(
        "Finalized {} module '{}' ({} entries)",
        conf.driver, conf.name, entries
    );
    Ok(WrittenModule {
        conf,
        conf_path,
        data_path,
        entries,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::versification::Versification;
    use pretty_assertions::assert_eq;

    fn template(name: &str) -> ConfRecord {
        let mut conf = ConfRecord::new(name);
        conf.set("Description", "Test module");
        conf.set("Lang", "en");
        conf
    }

    fn round_trip<W: ModuleWriter, R: ModuleReader>(mut writer: W, entries: &[(&str, &str)], name: &str) -> (tempfile::TempDir, WrittenModule, R) {
        let root = tempfile::tempdir().expect("tempdir");
        for (key, text) in entries {
            writer.write_entry(key, text).expect("write entry");
        }
        let written = writer.finalize(root.path(), &template(name)).expect("finalize");
        let conf = ConfRecord::from_path(&written.conf_path).expect("conf");
        let data = conf.resolve_data_path(root.path());
        assert_eq!(data, written.data_path);
        let reader = R::open(&conf, &data, &OpenOptions::default()).expect("open");
        (root, written, reader)
    }

    #[test]
    fn test_ztext_through_traits() {
        let (_root, written, reader) = round_trip::<_, ZTextReader>(
            ZTextWriter::new(Versification::new("KJV")),
            &[("Gen.1.1", "In the beginning"), ("John.1.1", "In the beginning was the Word")],
            "Test",
        );
        assert_eq!(written.entries, 2);
        assert_eq!(written.conf.driver, "zText");
        assert_eq!(written.conf.data_path, "./modules/texts/ztext/test/");
        assert_eq!(written.conf.versification, "KJV");
        assert!(written.conf_path.ends_with("mods.d/test.conf"));

        assert_eq!(reader.kind(), ModuleKind::Bible);
        assert_eq!(reader.read_entry("Gen.1.1").unwrap().as_deref(), Some("In the beginning"));
        assert_eq!(reader.read_entry("Gen.1.2").unwrap(), None);
        let keys = reader.entry_keys().unwrap();
        assert_eq!(keys.len(), 31102);
        assert_eq!(keys[0], "Gen.1.1");
    }

    #[test]
    fn test_zcom_through_traits() {
        let (_root, written, reader) = round_trip::<_, ZComReader>(
            ZComWriter::new(Versification::new("KJV")),
            &[("Rom.1.1", "Paul")],
            "Notes",
        );
        assert_eq!(written.conf.driver, "zCom");
        assert_eq!(reader.read_entry("Rom.1.1").unwrap().as_deref(), Some("Paul"));
        // Only the New Testament was written
        assert_eq!(reader.entry_keys().unwrap().len(), 7957);
    }

    #[test]
    fn test_zld_through_traits() {
        let (_root, written, reader) = round_trip::<_, ZldReader>(
            ZldWriter::new(),
            &[("G2316", "theos"), ("G0025", "agapao")],
            "StrongsGreek",
        );
        assert_eq!(written.conf.data_path, "./modules/lexdict/zld/strongsgreek/dict");
        assert_eq!(reader.entry_keys().unwrap(), vec!["G0025", "G2316"]);
        assert_eq!(reader.read_entry("G2316").unwrap().as_deref(), Some("theos"));
        assert_eq!(reader.read_entry("G9999").unwrap(), None);
    }

    #[test]
    fn test_genbook_through_traits() {
        let (_root, written, reader) = round_trip::<_, GenBookReader>(
            GenBookWriter::new(),
            &[("/Book/Part 1", "first"), ("/Book/Part 2", "second")],
            "Creeds",
        );
        assert_eq!(written.entries, 2);
        assert_eq!(reader.entry_keys().unwrap(), vec!["/Book", "/Book/Part 1", "/Book/Part 2"]);
        assert_eq!(reader.read_entry("/Book").unwrap(), None);
        assert_eq!(reader.read_entry("/Book/Part 2").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_manifest_drops_cipher_key() {
        let mut conf = template("Locked");
        conf.set("CipherKey", "secret");
        conf.set("Encoding", "Latin-1");
        let manifest = manifest(&conf, ModuleKind::Dictionary, "./x");
        assert!(!manifest.is_encrypted());
        assert!(manifest.property("CipherKey").is_none());
        assert_eq!(manifest.encoding, "UTF-8");
        assert_eq!(manifest.description, "Test module");
    }

    #[test]
    fn test_error_classes() {
        let reference: CodecError = ReferenceError::UnknownBook("Xyz".into()).into();
        assert_eq!(reference.class(), ErrorClass::Reference);

        let format: CodecError = BlockError::Misaligned {
            table: "verse index",
            len: 15,
            stride: 10,
        }
        .into();
        assert_eq!(format.class(), ErrorClass::Format);

        let range: CodecError = VerseStoreError::from(BlockError::BlockOutOfRange { block: 9, count: 1 }).into();
        assert_eq!(range.class(), ErrorClass::Range);

        let compression: CodecError = ZldError::from(BlockError::Compression("bad header".into())).into();
        assert_eq!(compression.class(), ErrorClass::Compression);

        assert_eq!(CodecError::Unsupported("RawText".into()).class(), ErrorClass::Unsupported);
        assert_eq!(
            CodecError::GenBook(GenBookError::Cycle(3)).class(),
            ErrorClass::Format
        );
    }
}
