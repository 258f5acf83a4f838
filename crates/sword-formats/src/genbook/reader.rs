//! RawGenBook reader

use std::path::Path;

use tracing::info;

use super::error::{GenBookError, GenBookResult};
use super::tree::{DataEntry, NO_LINK, TreeKey, TreePaths, link, parse_tree, path_segments};
use crate::block::{byte_range, read_table};
use crate::conf::{ConfRecord, TextEncoding};

/// Reads the node tree and content of a general book
///
/// Node 0 is the unnamed root. Every link is validated at open, so tree
/// walks cannot leave the node table.
#[derive(Debug)]
pub struct GenBookReader {
    nodes: Vec<TreeKey>,
    data: Vec<u8>,
    encoding: TextEncoding,
}

impl GenBookReader {
    /// Open the tree files sharing the path stem `stem`
    pub fn open(conf: &ConfRecord, stem: impl AsRef<Path>) -> GenBookResult<Self> {
        let stem = stem.as_ref();
        let paths = TreePaths::new(stem);
        let read = |path: &Path| std::fs::read(path).map_err(GenBookError::io(path));

        let encoding = conf.text_encoding();
        let records = parse_tree(&read(&paths.bdt)?)?;
        let index: Vec<DataEntry> = read_table(&read(&paths.idx)?)?;

        let mut nodes: Vec<TreeKey> = records
            .into_iter()
            .map(|(parent, first_child, next_sibling, name)| TreeKey {
                name: encoding.decode(&name),
                parent,
                first_child,
                next_sibling,
                offset: 0,
                size: 0,
            })
            .collect();
        validate_links(&nodes)?;
        assign_content(&mut nodes, &index)?;

        let data = read(&paths.dat)?;
        info!(
            "Opened RawGenBook module '{}' at {} ({} nodes)",
            conf.name,
            stem.display(),
            nodes.len()
        );
        Ok(Self {
            nodes,
            data,
            encoding,
        })
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by ordinal
    pub fn node(&self, index: usize) -> GenBookResult<&TreeKey> {
        self.nodes.get(index).ok_or(GenBookError::NodeOutOfRange {
            index,
            count: self.nodes.len(),
        })
    }

    /// Ordinals of a node's children in sibling order
    pub fn children(&self, index: usize) -> GenBookResult<Vec<usize>> {
        let mut children = Vec::new();
        let mut next = link(self.node(index)?.first_child);
        while let Some(child) = next {
            if children.len() > self.nodes.len() {
                return Err(GenBookError::Cycle(index));
            }
            children.push(child);
            next = link(self.nodes[child].next_sibling);
        }
        Ok(children)
    }

    /// Full path of a node, `/` for the root
    pub fn path_of(&self, index: usize) -> GenBookResult<String> {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(ordinal) = current {
            if segments.len() > self.nodes.len() {
                return Err(GenBookError::Cycle(index));
            }
            let node = self.node(ordinal)?;
            current = link(node.parent);
            if current.is_some() {
                segments.push(node.name.as_str());
            }
        }
        segments.reverse();
        Ok(format!("/{}", segments.join("/")))
    }

    /// Find a node by full path
    pub fn find(&self, path: &str) -> GenBookResult<Option<usize>> {
        if self.nodes.is_empty() {
            return Ok(None);
        }
        let mut current = 0;
        for segment in path_segments(path) {
            let found = self
                .children(current)?
                .into_iter()
                .find(|&child| self.nodes[child].name == segment);
            match found {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Content of a node, `None` when it has none
    pub fn content(&self, index: usize) -> GenBookResult<Option<String>> {
        let node = self.node(index)?;
        if !node.has_content() {
            return Ok(None);
        }
        let bytes = byte_range(&self.data, u64::from(node.offset), u64::from(node.size))?;
        Ok(Some(self.encoding.decode(bytes)))
    }

    /// Content of the node at a path
    pub fn content_at(&self, path: &str) -> GenBookResult<Option<String>> {
        match self.find(path)? {
            Some(index) => self.content(index),
            None => Ok(None),
        }
    }

    /// Every node below the root, depth first in sibling order
    pub fn traverse(&self) -> GenBookResult<Vec<usize>> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return Ok(order);
        }
        let mut stack = self.children(0)?;
        stack.reverse();
        while let Some(index) = stack.pop() {
            if order.len() >= self.nodes.len() {
                return Err(GenBookError::Cycle(index));
            }
            order.push(index);
            let mut children = self.children(index)?;
            children.reverse();
            stack.extend(children);
        }
        Ok(order)
    }
}

/// Attach `.idx` records to nodes
///
/// A full index has one record per node in ordinal order. A compact index
/// has one record per leaf, in depth-first order; interior nodes then carry
/// no content.
fn assign_content(nodes: &mut [TreeKey], index: &[DataEntry]) -> GenBookResult<()> {
    let targets: Vec<usize> = if index.len() == nodes.len() {
        (0..nodes.len()).collect()
    } else {
        let leaves = depth_first(nodes)?
            .into_iter()
            .filter(|&i| nodes[i].first_child == NO_LINK)
            .collect::<Vec<_>>();
        if leaves.len() != index.len() {
            return Err(GenBookError::CountMismatch {
                nodes: nodes.len(),
                records: index.len(),
            });
        }
        leaves
    };

    for (target, data) in targets.into_iter().zip(index) {
        nodes[target].offset = data.offset;
        nodes[target].size = data.size;
    }
    Ok(())
}

/// Ordinals below the root in depth-first order, over validated links
fn depth_first(nodes: &[TreeKey]) -> GenBookResult<Vec<usize>> {
    let mut order = Vec::with_capacity(nodes.len());
    let mut stack = Vec::new();
    if let Some(root) = nodes.first() {
        stack.extend(link(root.first_child));
    }
    while let Some(index) = stack.pop() {
        if order.len() >= nodes.len() {
            return Err(GenBookError::Cycle(index));
        }
        order.push(index);
        // Sibling goes under the child so the child's subtree is walked first
        stack.extend(link(nodes[index].next_sibling));
        stack.extend(link(nodes[index].first_child));
    }
    Ok(order)
}

fn validate_links(nodes: &[TreeKey]) -> GenBookResult<()> {
    for (ordinal, node) in nodes.iter().enumerate() {
        for value in [node.parent, node.first_child, node.next_sibling] {
            let valid = value == NO_LINK || link(value).is_some_and(|i| i < nodes.len());
            if !valid {
                return Err(GenBookError::BadLink {
                    node: ordinal,
                    link: value,
                });
            }
        }
    }
    Ok(())
}
