//! Readers and writers for SWORD Bible module formats
//!
#![allow(clippy::cast_possible_truncation)] // Index fields are 32-bit on disk
#![allow(clippy::cast_possible_wrap)] // Tree links are signed on disk
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
#![allow(clippy::doc_markdown)] // Format names need no backticks
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::missing_errors_doc)] // Error enums document themselves
//! This crate parses and builds the binary files of the SWORD module
//! formats and carries the versification arithmetic that addresses verses
//! inside them.
//!
//! # Supported Formats
//!
//! - **conf**: INI-style module descriptors under `mods.d/`
//! - **zText**: block-compressed Bible text, one verse index slot per verse
//! - **zCom**: block-compressed commentary in the zText layout
//! - **zLD**: sorted, block-compressed lexicon and dictionary entries
//! - **RawGenBook**: trees of named nodes with uncompressed content
//!
//! # Versification
//!
//! Verse-indexed modules reserve header slots for the module, each
//! testament, every book and every chapter. [`versification::Versification`]
//! maps a [`reference::Reference`] onto that slot layout and back for the
//! KJV, NRSV, NRSVA, Vulgate, Catholic and Ethiopian canons.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use sword_formats::conf::ConfRecord;
//! use sword_formats::reference::Reference;
//! use sword_formats::ztext::ZTextReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let conf = ConfRecord::from_path("mods.d/kjv.conf")?;
//! let reader = ZTextReader::open(&conf, conf.resolve_data_path(Path::new(".")), 16)?;
//! let text = reader.verse_text(&Reference::parse("John 3:16")?)?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Shared zlib block codec
///
/// Used by the zText, zCom and zLD writers to pack entries into compressed
/// blocks and by their readers to slice entries back out.
pub mod block;

/// Uniform reader/writer traits over every module format
pub mod codec;

/// Module `.conf` descriptor parsing and writing
pub mod conf;

/// RawGenBook general books
pub mod genbook;

/// Bible reference parsing and book name tables
pub mod reference;

/// Canon tables and verse index arithmetic
pub mod versification;

/// zCom commentaries
pub mod zcom;

/// zLD lexicons and dictionaries
pub mod zld;

/// zText Bible text
pub mod ztext;

pub use codec::{CodecError, CodecResult, ErrorClass, ModuleReader, ModuleWriter, OpenOptions, WrittenModule};
pub use conf::{ConfRecord, ModuleKind};
pub use reference::Reference;
pub use versification::{Versification, VersificationSystem};
