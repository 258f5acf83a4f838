//! Corpus to module emission

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sword_formats::ModuleWriter;
use sword_formats::conf::{ConfRecord, ModuleKind};
use sword_formats::genbook::GenBookWriter;
use sword_formats::reference::Reference;
use sword_formats::versification::Versification;
use sword_formats::zcom::ZComWriter;
use sword_formats::zld::ZldWriter;
use sword_formats::ztext::{BlockGranularity, ZTextWriter};
use tracing::{info, warn};

use super::model::IrCorpus;
use crate::error::{CorpusError, CorpusResult};

/// Conf keys owned by the writer rather than carried over from the source
const LAYOUT_KEYS: [&str; 7] = [
    "ModDrv",
    "DataPath",
    "CompressType",
    "BlockType",
    "Versification",
    "CipherKey",
    "Encoding",
];

/// Outcome of [`emit_module`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitResult {
    /// Kind of module written
    pub kind: ModuleKind,
    /// Manifest written under `mods.d/`
    pub conf_path: PathBuf,
    /// Data directory or file stem
    pub data_path: PathBuf,
    /// Entries with content in the written module
    pub entries_written: usize,
    /// Blocks whose id does not address an entry of the target kind
    pub skipped: usize,
}

/// Write a corpus as a module of the given kind under `output_dir`
///
/// Every block is written in corpus order, preferring its raw markup over
/// its plain text. Blocks that do not resolve for the target kind are
/// counted in [`EmitResult::skipped`].
pub fn emit_module(corpus: &IrCorpus, kind: ModuleKind, output_dir: impl AsRef<Path>) -> CorpusResult<EmitResult> {
    let output_dir = output_dir.as_ref();
    let mut writer = writer_for(corpus, kind)?;

    let mut skipped = 0;
    for block in corpus.blocks() {
        let written = check_block_id(kind, &block.id).and_then(|()| {
            writer
                .write_entry(&block.id, block.content())
                .map_err(CorpusError::from)
        });
        if let Err(e) = written {
            warn!("Skipping block '{}' of '{}': {}", block.id, corpus.id, e);
            skipped += 1;
        }
    }

    let written = writer.finalize(output_dir, &template(corpus))?;
    info!(
        "Emitted '{}' as {} into {} ({} entries, {} skipped)",
        corpus.id,
        kind,
        output_dir.display(),
        written.entries,
        skipped
    );
    Ok(EmitResult {
        kind,
        conf_path: written.conf_path,
        data_path: written.data_path,
        entries_written: written.entries,
        skipped,
    })
}

fn writer_for(corpus: &IrCorpus, kind: ModuleKind) -> CorpusResult<Box<dyn ModuleWriter>> {
    let versification = || Versification::new(corpus.versification.as_deref().unwrap_or_default());
    let granularity = corpus
        .properties
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("BlockType"))
        .map(|(_, value)| BlockGranularity::from_conf_value(value))
        .unwrap_or_default();

    let writer: Box<dyn ModuleWriter> = match kind {
        ModuleKind::Bible => Box::new(ZTextWriter::new(versification()).with_granularity(granularity)),
        ModuleKind::Commentary => Box::new(ZComWriter::new(versification()).with_granularity(granularity)),
        ModuleKind::Dictionary => Box::new(ZldWriter::new()),
        ModuleKind::GenBook => Box::new(GenBookWriter::new()),
        ModuleKind::Unknown => {
            return Err(CorpusError::Unsupported {
                driver: kind.to_string(),
            });
        }
    };
    Ok(writer)
}

/// Reject ids that cannot address an entry of `kind`
fn check_block_id(kind: ModuleKind, id: &str) -> CorpusResult<()> {
    let valid = match kind {
        ModuleKind::Bible | ModuleKind::Commentary => Reference::parse(id).is_ok(),
        ModuleKind::Dictionary => !id.is_empty(),
        ModuleKind::GenBook => id.starts_with('/'),
        ModuleKind::Unknown => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CorpusError::InvalidBlockId {
            id: id.to_string(),
            kind,
        })
    }
}

/// Conf template carrying the corpus' descriptive keys
fn template(corpus: &IrCorpus) -> ConfRecord {
    let mut conf = ConfRecord::new(corpus.id.as_str());
    for (key, value) in &corpus.properties {
        if !LAYOUT_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
            conf.set(key, value.as_str());
        }
    }
    if !corpus.title.is_empty() {
        conf.set("Description", corpus.title.as_str());
    }
    if !corpus.language.is_empty() {
        conf.set("Lang", corpus.language.as_str());
    }
    conf
}
