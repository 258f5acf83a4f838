//! Intermediate corpus representation

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sword_formats::conf::ModuleKind;

use crate::error::CorpusResult;

/// How much of the source an extraction preserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LossClass {
    /// Byte-exact
    L0,
    /// Structure and plain text, with the original markup kept verbatim
    #[default]
    L1,
    /// Structure and plain text only
    L2,
    /// Plain text only
    L3,
    /// Partial text
    L4,
}

impl fmt::Display for LossClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L0 => "L0",
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
        };
        f.write_str(name)
    }
}

/// One addressable entry: a verse, dictionary entry or tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrContentBlock {
    /// Entry key: OSIS reference, dictionary key or node path
    pub id: String,
    /// Position within the document, from 0
    pub sequence: u32,
    /// Plain text
    pub text: String,
    /// Entry as stored, when it differs from `text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_markup: Option<String>,
    /// Lowercase hex SHA-256 of the raw markup, or of the text without it
    pub hash: String,
    /// Whether the entry opens a chapter
    #[serde(default)]
    pub chapter_marker: bool,
}

impl IrContentBlock {
    /// Build a block, computing its hash
    pub fn new(id: impl Into<String>, sequence: u32, text: impl Into<String>, raw_markup: Option<String>) -> Self {
        let text = text.into();
        let hash = content_hash(raw_markup.as_deref().unwrap_or(&text));
        Self {
            id: id.into(),
            sequence,
            text,
            raw_markup,
            hash,
            chapter_marker: false,
        }
    }

    /// Mark the block as opening a chapter
    #[must_use]
    pub const fn with_chapter_marker(mut self, marker: bool) -> Self {
        self.chapter_marker = marker;
        self
    }

    /// Content a writer should store: the raw markup when present
    pub fn content(&self) -> &str {
        self.raw_markup.as_deref().unwrap_or(&self.text)
    }

    /// Whether the stored hash matches the content
    pub fn verify_hash(&self) -> bool {
        content_hash(self.content()) == self.hash
    }
}

/// A book of a Bible or commentary, a dictionary, or a top-level section
/// of a general book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrDocument {
    /// Document id: OSIS book id, or the section name
    pub id: String,
    /// Display title
    pub title: String,
    /// Position in the corpus, from 0
    pub order: u32,
    /// Entries in module order
    pub content_blocks: Vec<IrContentBlock>,
}

impl IrDocument {
    /// Empty document
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
            content_blocks: Vec::new(),
        }
    }
}

/// A module's content, independent of the format it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrCorpus {
    /// Module name
    pub id: String,
    /// Module description
    pub title: String,
    /// Language code
    pub language: String,
    /// Kind of module extracted
    pub module_type: ModuleKind,
    /// Versification id for versified modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versification: Option<String>,
    /// Fidelity of the extraction
    pub loss_class: LossClass,
    /// Source conf properties, for writing the module back
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Documents in module order
    pub documents: Vec<IrDocument>,
}

impl IrCorpus {
    /// Every block in corpus order
    pub fn blocks(&self) -> impl Iterator<Item = &IrContentBlock> {
        self.documents.iter().flat_map(|d| d.content_blocks.iter())
    }

    /// Number of blocks across every document
    pub fn block_count(&self) -> usize {
        self.documents.iter().map(|d| d.content_blocks.len()).sum()
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> CorpusResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> CorpusResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One entry that failed to decode during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFailure {
    /// Entry key
    pub key: String,
    /// Error message
    pub error: String,
}

/// Counters gathered while extracting a corpus
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Documents produced
    pub documents: usize,
    /// Blocks produced
    pub blocks: usize,
    /// Whitespace-separated words of plain text
    pub tokens: usize,
    /// Markup elements removed
    pub annotations: usize,
    /// Entries that could not be read
    pub failures: Vec<EntryFailure>,
    /// Entries present in the index but empty
    pub skipped_empty: usize,
}

/// Lowercase hex SHA-256 of a string
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
