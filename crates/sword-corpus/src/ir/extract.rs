//! Module to corpus extraction

use sword_formats::conf::{ConfRecord, ModuleKind};
use sword_formats::reference::books::book_display_name;
use tracing::{debug, info, warn};

use super::markup::{contains_markup, count_tokens, has_chapter_marker, strip_markup};
use super::model::{EntryFailure, ExtractionStats, IrContentBlock, IrCorpus, IrDocument, LossClass};
use crate::error::CorpusResult;
use crate::module::Module;

/// Options for [`extract_corpus_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Produce plain text next to the raw markup
    pub strip_markup: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { strip_markup: true }
    }
}

/// Walk every entry of a module into a corpus, stripping markup
pub fn extract_corpus(module: &Module, conf: &ConfRecord) -> CorpusResult<(IrCorpus, ExtractionStats)> {
    extract_corpus_with(module, conf, &ExtractOptions::default())
}

/// Walk every entry of a module into a corpus
///
/// Entries that fail to decode are recorded in
/// [`ExtractionStats::failures`] and skipped. Only failing to list the
/// module's entries is an error.
pub fn extract_corpus_with(
    module: &Module,
    conf: &ConfRecord,
    options: &ExtractOptions,
) -> CorpusResult<(IrCorpus, ExtractionStats)> {
    let reader = module.reader();
    let kind = module.kind();
    let keys = reader.entry_keys()?;
    debug!("Extracting {} entries from '{}'", keys.len(), conf.name);

    let mut documents: Vec<IrDocument> = Vec::new();
    let mut stats = ExtractionStats::default();

    for key in keys {
        let raw = match reader.read_entry(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                stats.skipped_empty += 1;
                continue;
            }
            Err(e) => {
                warn!("Failed to read entry '{}' of '{}': {}", key, conf.name, e);
                stats.failures.push(EntryFailure {
                    key,
                    error: e.to_string(),
                });
                continue;
            }
        };

        let (text, raw_markup) = if options.strip_markup && contains_markup(&raw) {
            let stripped = strip_markup(&raw);
            stats.annotations += stripped.annotations;
            let raw_markup = (stripped.text != raw).then(|| raw.clone());
            (stripped.text, raw_markup)
        } else {
            (raw.clone(), None)
        };
        stats.tokens += count_tokens(&text);

        let (document_id, title) = document_for(kind, &key, conf);
        if documents.last().is_none_or(|d| d.id != document_id) {
            let order = documents.len() as u32;
            documents.push(IrDocument::new(document_id, title, order));
        }
        if let Some(document) = documents.last_mut() {
            let sequence = document.content_blocks.len() as u32;
            document.content_blocks.push(
                IrContentBlock::new(key, sequence, text, raw_markup).with_chapter_marker(has_chapter_marker(&raw)),
            );
        }
    }

    stats.documents = documents.len();
    stats.blocks = documents.iter().map(|d| d.content_blocks.len()).sum();

    let versification = match module {
        Module::Bible(reader) => Some(reader.versification().name().to_string()),
        Module::Commentary(reader) => Some(reader.versification().name().to_string()),
        Module::Dictionary(_) | Module::GenBook(_) => None,
    };

    info!(
        "Extracted '{}': {} documents, {} blocks, {} empty, {} failed",
        conf.name,
        stats.documents,
        stats.blocks,
        stats.skipped_empty,
        stats.failures.len()
    );

    let corpus = IrCorpus {
        id: conf.name.clone(),
        title: conf.description.clone(),
        language: conf.language.clone(),
        module_type: kind,
        versification,
        loss_class: LossClass::L1,
        properties: conf.properties.clone(),
        documents,
    };
    Ok((corpus, stats))
}

/// Document id and title an entry key belongs to
fn document_for(kind: ModuleKind, key: &str, conf: &ConfRecord) -> (String, String) {
    match kind {
        ModuleKind::Bible | ModuleKind::Commentary => {
            let book = key.split('.').next().unwrap_or(key);
            let title = book_display_name(book).unwrap_or(book);
            (book.to_string(), title.to_string())
        }
        ModuleKind::GenBook => {
            let section = key.split('/').find(|s| !s.is_empty()).unwrap_or("/");
            (section.to_string(), section.to_string())
        }
        ModuleKind::Dictionary | ModuleKind::Unknown => {
            let title = if conf.description.is_empty() {
                &conf.name
            } else {
                &conf.description
            };
            (conf.name.clone(), title.clone())
        }
    }
}
