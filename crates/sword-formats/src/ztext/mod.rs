//! zText compressed Bible modules
//!
//! Each testament is stored in three files:
//!
//! - `ot.bzs`/`nt.bzs`: block index, 12 bytes per block
//! - `ot.bzv`/`nt.bzv`: verse index, 10 bytes per versification slot
//! - `ot.bzz`/`nt.bzz`: concatenated zlib blocks
//!
//! The verse index has one record for every slot the versification defines,
//! headings included, so a verse's record is found by index arithmetic
//! alone. zCom commentaries use the same files; see [`crate::zcom`].

mod error;
mod index;
mod reader;
mod store;
mod writer;

pub use error::{VerseStoreError, VerseStoreResult};
pub use index::VerseEntry;
pub use reader::ZTextReader;
pub use store::{Testament, VerseStore};
pub use writer::{BlockGranularity, TestamentSummary, WriteSummary, ZTextWriter};
