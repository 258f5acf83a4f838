//! Opening modules by their conf

use std::fmt;

use serde::{Deserialize, Serialize};
use sword_formats::conf::{ConfRecord, ModuleKind};
use sword_formats::genbook::GenBookReader;
use sword_formats::reference::Reference;
use sword_formats::zcom::ZComReader;
use sword_formats::zld::ZldReader;
use sword_formats::ztext::{VerseStoreError, ZTextReader};
use sword_formats::{CodecError, ModuleReader};
use tracing::{debug, warn};

use crate::config::IngestConfig;
use crate::error::{CorpusError, CorpusResult};

/// An opened module, one variant per codec
#[derive(Debug)]
pub enum Module {
    /// zText Bible
    Bible(ZTextReader),
    /// zCom commentary
    Commentary(ZComReader),
    /// zLD dictionary
    Dictionary(ZldReader),
    /// RawGenBook general book
    GenBook(GenBookReader),
}

impl Module {
    /// Kind of module held
    pub const fn kind(&self) -> ModuleKind {
        match self {
            Self::Bible(_) => ModuleKind::Bible,
            Self::Commentary(_) => ModuleKind::Commentary,
            Self::Dictionary(_) => ModuleKind::Dictionary,
            Self::GenBook(_) => ModuleKind::GenBook,
        }
    }

    /// The codec behind this module
    pub fn reader(&self) -> &dyn ModuleReader {
        match self {
            Self::Bible(reader) => reader,
            Self::Commentary(reader) => reader,
            Self::Dictionary(reader) => reader,
            Self::GenBook(reader) => reader,
        }
    }

    /// Text of a verse or passage in a versified module
    ///
    /// An empty slot yields an empty string.
    pub fn verse_text(&self, reference: &Reference) -> CorpusResult<String> {
        let text = match self {
            Self::Bible(reader) => reader.passage_text(reference),
            Self::Commentary(reader) => reader.verses().passage_text(reference),
            Self::Dictionary(_) | Self::GenBook(_) => {
                return Err(CorpusError::Unsupported {
                    driver: format!("verse lookup on {}", self.kind()),
                });
            }
        };
        Ok(text.map_err(CodecError::from)?)
    }
}

/// Why a module was not opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The conf carries a cipher key
    Encrypted,
    /// A verse-indexed module without any testament files
    NoTestamentData,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Encrypted => "module is encrypted",
            Self::NoTestamentData => "module has no testament data",
        })
    }
}

/// Result of [`open_module`]
#[derive(Debug)]
pub enum OpenOutcome {
    /// The module is ready to read
    Opened(Module),
    /// The module holds no readable data; not an error
    Skipped(SkipReason),
}

impl OpenOutcome {
    /// The opened module, if any
    pub fn module(self) -> Option<Module> {
        match self {
            Self::Opened(module) => Some(module),
            Self::Skipped(_) => None,
        }
    }
}

/// Open the module a conf describes
///
/// Drivers without a codec fail with [`CorpusError::Unsupported`] before
/// any file is touched. A conf without a versification uses the
/// configured default.
pub fn open_module(conf: &ConfRecord, config: &IngestConfig) -> CorpusResult<OpenOutcome> {
    if conf.is_encrypted() {
        warn!("Skipping module '{}': {}", conf.name, SkipReason::Encrypted);
        return Ok(OpenOutcome::Skipped(SkipReason::Encrypted));
    }
    if !ModuleKind::is_supported_driver(&conf.driver) {
        return Err(CorpusError::Unsupported {
            driver: conf.driver.clone(),
        });
    }

    let mut conf = conf.clone();
    if conf.versification.trim().is_empty() {
        conf.set("Versification", config.default_versification.as_str());
    }
    let data_path = conf.resolve_data_path(&config.base_path);
    let options = config.open_options();
    debug!(
        "Opening {} module '{}' from {}",
        conf.driver,
        conf.name,
        data_path.display()
    );

    let module = match conf.module_kind() {
        ModuleKind::Bible => match ZTextReader::open(&conf, &data_path, options.cache_capacity) {
            Ok(reader) => Module::Bible(reader),
            Err(e) => return skip_or_fail(&conf, e),
        },
        ModuleKind::Commentary => match ZComReader::open(&conf, &data_path, options.cache_capacity) {
            Ok(reader) => Module::Commentary(reader),
            Err(e) => return skip_or_fail(&conf, e),
        },
        ModuleKind::Dictionary => {
            Module::Dictionary(ZldReader::open(&conf, &data_path).map_err(CodecError::from)?)
        }
        ModuleKind::GenBook => {
            Module::GenBook(GenBookReader::open(&conf, &data_path).map_err(CodecError::from)?)
        }
        ModuleKind::Unknown => {
            return Err(CorpusError::Unsupported {
                driver: conf.driver.clone(),
            });
        }
    };
    Ok(OpenOutcome::Opened(module))
}

/// A verse store without testament files is skipped, anything else fails
fn skip_or_fail(conf: &ConfRecord, error: VerseStoreError) -> CorpusResult<OpenOutcome> {
    match error {
        VerseStoreError::NoTestamentData(dir) => {
            warn!(
                "Skipping module '{}': no testament data in {}",
                conf.name,
                dir.display()
            );
            Ok(OpenOutcome::Skipped(SkipReason::NoTestamentData))
        }
        e => Err(CodecError::from(e).into()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use sword_formats::ErrorClass;

    #[test]
    fn test_encrypted_is_skipped() {
        let conf = ConfRecord::parse_str("[Locked]\nModDrv=zText\nCipherKey=abc123\n");
        let outcome = open_module(&conf, &IngestConfig::new("/nonexistent")).unwrap();
        assert!(matches!(outcome, OpenOutcome::Skipped(SkipReason::Encrypted)));
    }

    #[test]
    fn test_raw_driver_is_unsupported() {
        let conf = ConfRecord::parse_str("[Old]\nModDrv=RawText\nDataPath=./modules/texts/rawtext/old/\n");
        let error = open_module(&conf, &IngestConfig::new("/nonexistent")).unwrap_err();
        assert_eq!(error.class(), ErrorClass::Unsupported);
    }

    #[test]
    fn test_empty_bible_is_skipped() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join("modules/texts/ztext/empty")).expect("mkdir");
        let conf = ConfRecord::parse_str("[Empty]\nModDrv=zText\nDataPath=./modules/texts/ztext/empty/\n");
        let outcome = open_module(&conf, &IngestConfig::new(root.path())).unwrap();
        assert!(matches!(outcome, OpenOutcome::Skipped(SkipReason::NoTestamentData)));
        assert!(outcome.module().is_none());
    }

    #[test]
    fn test_missing_dictionary_is_io() {
        let conf = ConfRecord::parse_str("[Gone]\nModDrv=zLD\nDataPath=./modules/lexdict/zld/gone/dict\n");
        let error = open_module(&conf, &IngestConfig::new("/nonexistent")).unwrap_err();
        assert_eq!(error.class(), ErrorClass::Io);
    }
}
