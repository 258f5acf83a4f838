//! Per-testament verse storage shared by zText and zCom

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;
use tracing::{debug, trace, warn};

use super::error::{VerseStoreError, VerseStoreResult};
use super::index::VerseEntry;
use crate::block::{BlockEntry, BlockError, inflate, read_table, slice_entry, trim_nul};

/// Old or New Testament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Testament {
    /// Old Testament, files prefixed `ot`
    Old,
    /// New Testament, files prefixed `nt`
    New,
}

impl Testament {
    /// Both testaments, Old first
    pub const ALL: [Self; 2] = [Self::Old, Self::New];

    /// Testament from the `is_nt` flag used by the versification engine
    pub const fn from_is_nt(is_nt: bool) -> Self {
        if is_nt { Self::New } else { Self::Old }
    }

    /// Flag form
    pub const fn is_nt(self) -> bool {
        matches!(self, Self::New)
    }

    /// File name prefix
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Old => "ot",
            Self::New => "nt",
        }
    }

    /// Block index file of this testament
    pub fn block_index_path(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.bzs", self.prefix()))
    }

    /// Verse index file of this testament
    pub fn verse_index_path(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.bzv", self.prefix()))
    }

    /// Compressed data file of this testament
    pub fn data_path(self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.bzz", self.prefix()))
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Old => "Old Testament",
            Self::New => "New Testament",
        })
    }
}

/// Index tables of one testament
#[derive(Debug)]
struct TestamentIndex {
    blocks: Vec<BlockEntry>,
    verses: Vec<VerseEntry>,
    data_path: PathBuf,
}

impl TestamentIndex {
    fn load(dir: &Path, testament: Testament) -> VerseStoreResult<Option<Self>> {
        let bzs = testament.block_index_path(dir);
        let bzv = testament.verse_index_path(dir);
        if !bzs.is_file() || !bzv.is_file() {
            debug!("No {} index under {}", testament.prefix(), dir.display());
            return Ok(None);
        }

        let blocks = read_table(&std::fs::read(&bzs).map_err(VerseStoreError::io(&bzs))?)?;
        let verses = read_table(&std::fs::read(&bzv).map_err(VerseStoreError::io(&bzv))?)?;
        Ok(Some(Self {
            blocks,
            verses,
            data_path: testament.data_path(dir),
        }))
    }
}

type BlockCache = RwLock<LruCache<(Testament, u32), Arc<Vec<u8>>>>;

/// Read access to the `.bzs`/`.bzv`/`.bzz` files of a module
///
/// Index tables are loaded once at open. Blocks are read from the data file
/// on demand and memoised in a bounded LRU when a capacity is configured;
/// without one, every lookup reopens the data file.
pub struct VerseStore {
    dir: PathBuf,
    old: Option<TestamentIndex>,
    new: Option<TestamentIndex>,
    cache: Option<BlockCache>,
}

impl fmt::Debug for VerseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerseStore")
            .field("dir", &self.dir)
            .field("old", &self.old.as_ref().map(|t| t.verses.len()))
            .field("new", &self.new.as_ref().map(|t| t.verses.len()))
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl VerseStore {
    /// Load the index tables found in `dir`
    ///
    /// A missing testament is normal; a module with neither is an error.
    pub fn open(dir: impl AsRef<Path>, cache_capacity: usize) -> VerseStoreResult<Self> {
        let dir = dir.as_ref();
        let old = TestamentIndex::load(dir, Testament::Old)?;
        let new = TestamentIndex::load(dir, Testament::New)?;
        if old.is_none() && new.is_none() {
            return Err(VerseStoreError::NoTestamentData(dir.to_path_buf()));
        }

        debug!(
            "Opened verse store {} (ot: {:?} slots, nt: {:?} slots)",
            dir.display(),
            old.as_ref().map(|t| t.verses.len()),
            new.as_ref().map(|t| t.verses.len())
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            old,
            new,
            cache: NonZeroUsize::new(cache_capacity).map(|n| RwLock::new(LruCache::new(n))),
        })
    }

    /// Directory holding the module files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a testament's index files were present
    pub fn has_testament(&self, testament: Testament) -> bool {
        self.testament(testament).is_some()
    }

    /// Number of slots in a testament's verse index
    pub fn slot_count(&self, testament: Testament) -> usize {
        self.testament(testament).map_or(0, |t| t.verses.len())
    }

    /// Verse index record of a slot
    pub fn entry(&self, testament: Testament, index: u32) -> VerseStoreResult<VerseEntry> {
        let data = self
            .testament(testament)
            .ok_or(VerseStoreError::MissingTestament(testament))?;
        data.verses
            .get(index as usize)
            .copied()
            .ok_or(VerseStoreError::SlotOutOfRange {
                index,
                count: data.verses.len(),
            })
    }

    /// Raw bytes of a slot, trailing NULs removed; empty for an empty slot
    pub fn slot_bytes(&self, testament: Testament, index: u32) -> VerseStoreResult<Vec<u8>> {
        let entry = self.entry(testament, index)?;
        if entry.is_empty() {
            return Ok(Vec::new());
        }
        let block = self.block(testament, entry.block)?;
        let bytes = slice_entry(&block, entry.offset, u32::from(entry.size))?;
        Ok(trim_nul(bytes).to_vec())
    }

    fn testament(&self, testament: Testament) -> Option<&TestamentIndex> {
        match testament {
            Testament::Old => self.old.as_ref(),
            Testament::New => self.new.as_ref(),
        }
    }

    /// Decompressed block, through the cache when one is configured
    fn block(&self, testament: Testament, number: u32) -> VerseStoreResult<Arc<Vec<u8>>> {
        if let Some(cache) = &self.cache {
            if let Some(block) = cache.write().get(&(testament, number)) {
                trace!("Block cache hit: {} block {}", testament.prefix(), number);
                return Ok(Arc::clone(block));
            }
            trace!("Block cache miss: {} block {}", testament.prefix(), number);
        }

        let data = self
            .testament(testament)
            .ok_or(VerseStoreError::MissingTestament(testament))?;
        let entry = data
            .blocks
            .get(number as usize)
            .ok_or(BlockError::BlockOutOfRange {
                block: number,
                count: data.blocks.len(),
            })?;

        let block = Arc::new(read_compressed_block(&data.data_path, entry)?);
        if let Some(cache) = &self.cache {
            cache.write().put((testament, number), Arc::clone(&block));
        }
        Ok(block)
    }
}

/// Read and inflate one block straight from the data file
fn read_compressed_block(path: &Path, entry: &BlockEntry) -> VerseStoreResult<Vec<u8>> {
    let mut file = File::open(path).map_err(VerseStoreError::io(path))?;
    let file_len = file.metadata().map_err(VerseStoreError::io(path))?.len();
    if entry.end() > file_len {
        return Err(BlockError::SliceOutOfRange {
            offset: u64::from(entry.offset),
            size: u64::from(entry.compressed_size),
            len: usize::try_from(file_len).unwrap_or(usize::MAX),
        }
        .into());
    }

    file.seek(SeekFrom::Start(u64::from(entry.offset)))
        .map_err(VerseStoreError::io(path))?;
    let mut compressed = vec![0u8; entry.compressed_size as usize];
    file.read_exact(&mut compressed)
        .map_err(VerseStoreError::io(path))?;

    let block = inflate(&compressed)?;
    if block.len() != entry.uncompressed_size as usize {
        warn!(
            "Block at {}:{} inflated to {} bytes, index says {}",
            path.display(),
            entry.offset,
            block.len(),
            entry.uncompressed_size
        );
    }
    Ok(block)
}
