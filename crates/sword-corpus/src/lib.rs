//! Format-agnostic corpus extraction and emission for SWORD modules
//!
#![allow(clippy::cast_possible_truncation)] // Block sequences are 32-bit
#![allow(clippy::doc_markdown)] // Format names need no backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
//! This crate drives the codecs of `sword-formats` across whole modules:
//!
//! - [`ingest`] parses a conf, opens its module and extracts a corpus
//! - [`module::open_module`] dispatches on the conf driver once and
//!   reports encrypted or empty modules as skipped rather than failed
//! - [`ir::extract_corpus`] walks every verse, key or node into an
//!   [`ir::IrCorpus`] with plain text, raw markup and content hashes
//! - [`ir::emit_module`] writes a corpus back out as any module kind
//!
//! # Example
//!
//! ```no_run
//! use sword_corpus::{IngestConfig, IngestOutcome, ingest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IngestConfig::new("/usr/share/sword");
//! if let IngestOutcome::Extracted { corpus, stats, .. } = ingest("/usr/share/sword/mods.d/kjv.conf", &config)? {
//!     println!("{}: {} blocks", corpus.id, stats.blocks);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Ingestion configuration
pub mod config;

/// Error types
pub mod error;

/// Conf-to-corpus pipeline
pub mod ingest;

/// Intermediate corpus representation
pub mod ir;

/// Opening modules by their conf
pub mod module;

pub use config::IngestConfig;
pub use error::{CorpusError, CorpusResult};
pub use ingest::{IngestOutcome, ingest};
pub use module::{Module, OpenOutcome, SkipReason, open_module};
