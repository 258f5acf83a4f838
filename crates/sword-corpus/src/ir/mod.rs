//! Intermediate corpus representation and the round trip through it
//!
//! Extraction walks a module entry by entry into an [`IrCorpus`]: one
//! document per book, dictionary or top-level section, one block per
//! verse, key or node. Emission feeds the blocks back to a module writer.

pub mod emit;
pub mod extract;
pub mod markup;
pub mod model;

pub use emit::{EmitResult, emit_module};
pub use extract::{ExtractOptions, extract_corpus, extract_corpus_with};
pub use markup::{Stripped, strip_markup};
pub use model::{
    EntryFailure, ExtractionStats, IrContentBlock, IrCorpus, IrDocument, LossClass, content_hash,
};
