//! Conf-to-corpus pipeline

use std::path::Path;

use sword_formats::conf::{ConfRecord, parse_conf};
use tracing::info;

use crate::config::IngestConfig;
use crate::error::CorpusResult;
use crate::ir::{ExtractOptions, ExtractionStats, IrCorpus, extract_corpus_with};
use crate::module::{Module, OpenOutcome, SkipReason, open_module};

/// Result of [`ingest`]
#[derive(Debug)]
pub enum IngestOutcome {
    /// The module holds no readable data
    Skipped {
        /// Parsed conf
        conf: ConfRecord,
        /// Why nothing was read
        reason: SkipReason,
    },
    /// The module was opened; extraction was disabled
    Opened {
        /// Parsed conf
        conf: ConfRecord,
        /// Opened module
        module: Module,
    },
    /// The module was extracted
    Extracted {
        /// Parsed conf
        conf: ConfRecord,
        /// Extracted corpus
        corpus: IrCorpus,
        /// Extraction counters
        stats: ExtractionStats,
    },
}

impl IngestOutcome {
    /// Conf the outcome was produced from
    pub const fn conf(&self) -> &ConfRecord {
        match self {
            Self::Skipped { conf, .. } | Self::Opened { conf, .. } | Self::Extracted { conf, .. } => conf,
        }
    }

    /// Extracted corpus, if any
    pub const fn corpus(&self) -> Option<&IrCorpus> {
        match self {
            Self::Extracted { corpus, .. } => Some(corpus),
            Self::Skipped { .. } | Self::Opened { .. } => None,
        }
    }
}

/// Parse a conf, open its module and extract a corpus from it
pub fn ingest(conf_path: impl AsRef<Path>, config: &IngestConfig) -> CorpusResult<IngestOutcome> {
    let conf = parse_conf(conf_path)?;

    let module = match open_module(&conf, config)? {
        OpenOutcome::Opened(module) => module,
        OpenOutcome::Skipped(reason) => return Ok(IngestOutcome::Skipped { conf, reason }),
    };

    if config.skip_ir_extraction {
        info!("Opened '{}' without extraction", conf.name);
        return Ok(IngestOutcome::Opened { conf, module });
    }

    let options = ExtractOptions {
        strip_markup: config.strip_markup,
    };
    let (corpus, stats) = extract_corpus_with(&module, &conf, &options)?;
    Ok(IngestOutcome::Extracted { conf, corpus, stats })
}
