//! RawGenBook writer

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use tracing::info;

use super::error::{GenBookError, GenBookResult};
use super::tree::{DataEntry, NO_LINK, TreePaths, path_segments, to_link, write_record};
use crate::block::{BlockError, write_table};

#[derive(Debug)]
struct PendingNode {
    name: String,
    parent: Option<usize>,
    children: Vec<usize>,
    content: Option<String>,
}

/// Builds a general book tree from slash-separated paths
///
/// `put("/WCF/Chapter 1/Article 1", ..)` creates `WCF` and `Chapter 1`
/// without content if they do not exist yet. Children are linked in the
/// order they were first created.
#[derive(Debug)]
pub struct GenBookWriter {
    nodes: Vec<PendingNode>,
    by_path: HashMap<String, usize>,
}

impl Default for GenBookWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenBookWriter {
    /// Writer holding only the root node
    pub fn new() -> Self {
        Self {
            nodes: vec![PendingNode {
                name: String::new(),
                parent: None,
                children: Vec::new(),
                content: None,
            }],
            by_path: HashMap::new(),
        }
    }

    /// Set the content of the node at `path`, replacing earlier content
    ///
    /// Returns the node's ordinal. The root path `/` addresses node 0.
    pub fn put(&mut self, path: &str, content: impl Into<String>) -> GenBookResult<usize> {
        if path.contains('\0') {
            return Err(GenBookError::InvalidPath(path.to_string()));
        }

        let mut current = 0;
        let mut prefix = String::new();
        for segment in path_segments(path) {
            prefix.push('/');
            prefix.push_str(segment);
            current = match self.by_path.get(&prefix) {
                Some(&existing) => existing,
                None => {
                    let ordinal = self.nodes.len();
                    self.nodes.push(PendingNode {
                        name: segment.to_string(),
                        parent: Some(current),
                        children: Vec::new(),
                        content: None,
                    });
                    self.nodes[current].children.push(ordinal);
                    self.by_path.insert(prefix.clone(), ordinal);
                    ordinal
                }
            };
        }

        self.nodes[current].content = Some(content.into());
        Ok(current)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Write `<stem>.bdt`, `<stem>.idx` and `<stem>.dat`
    ///
    /// Returns the number of nodes with content.
    pub fn write_module(&self, stem: impl AsRef<Path>) -> GenBookResult<usize> {
        let stem = stem.as_ref();
        let mut next_sibling = vec![NO_LINK; self.nodes.len()];
        for node in &self.nodes {
            for pair in node.children.windows(2) {
                next_sibling[pair[0]] = to_link(Some(pair[1]));
            }
        }

        let mut bdt = Cursor::new(Vec::new());
        let mut index = Vec::with_capacity(self.nodes.len());
        let mut dat = Vec::new();
        let mut with_content = 0;

        for (ordinal, node) in self.nodes.iter().enumerate() {
            let links = (
                to_link(node.parent),
                to_link(node.children.first().copied()),
                next_sibling[ordinal],
            );
            write_record(&mut bdt, links, &node.name)?;

            let content = node.content.as_deref().unwrap_or_default().as_bytes();
            index.push(DataEntry {
                offset: to_u32("content", dat.len())?,
                size: to_u32("node content", content.len())?,
            });
            dat.extend_from_slice(content);
            with_content += usize::from(!content.is_empty());
        }

        let paths = TreePaths::new(stem);
        if let Some(parent) = paths.bdt.parent() {
            std::fs::create_dir_all(parent).map_err(GenBookError::io(parent))?;
        }
        let write = |path: &Path, bytes: &[u8]| std::fs::write(path, bytes).map_err(GenBookError::io(path));
        write(&paths.bdt, bdt.get_ref())?;
        write(&paths.idx, &write_table(&index)?)?;
        write(&paths.dat, &dat)?;

        info!(
            "Wrote RawGenBook {} ({} nodes, {} with content)",
            stem.display(),
            self.nodes.len(),
            with_content
        );
        Ok(with_content)
    }
}

fn to_u32(what: &'static str, size: usize) -> GenBookResult<u32> {
    u32::try_from(size).map_err(|_| BlockError::TooLarge { what, size }.into())
}
