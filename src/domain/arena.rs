//! Arena-backed CIB document tree.

use generational_arena::{Arena, Index};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use tracing::instrument;

use crate::domain::section::Section;

/// Attribute name -> value, in document order.
pub type Attributes = IndexMap<String, String>;

/// Whether a node carries data of its own or only groups children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Has at least one attribute
    Attributed,
    /// Tag only, e.g. `<configuration>` or `<resources>`
    Group,
}

/// One element of the CIB.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element tag
    pub tag: String,
    /// Attributes in document order (keys unique)
    pub attributes: Attributes,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in document order
    pub children: Vec<Index>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        if self.attributes.is_empty() {
            NodeKind::Group
        } else {
            NodeKind::Attributed
        }
    }

    pub fn is_attributed(&self) -> bool {
        self.kind() == NodeKind::Attributed
    }

    /// Value of attribute `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        match self.attr("id") {
            Some(id) => write!(f, " [{}]", id),
            None => Ok(()),
        }
    }
}

/// A parsed CIB snapshot from a single daemon query.
///
/// Uses generational arena for memory-safe node references. The document owns
/// every node; nothing here is shared between fetches.
#[derive(Debug, Default)]
pub struct ConfigDocument {
    arena: Arena<Node>,
    root: Option<Index>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node under `parent`, or make it the root when `parent` is None.
    #[instrument(level = "trace", skip(self, attributes))]
    pub fn insert_node(
        &mut self,
        tag: impl Into<String> + fmt::Debug,
        attributes: Attributes,
        parent: Option<Index>,
    ) -> Index {
        let node = Node {
            tag: tag.into(),
            attributes,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Pre-order depth-first traversal of the whole document.
    ///
    /// Every call starts from the root again.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root)
    }

    /// Direct children of `idx`, in document order.
    pub fn children(&self, idx: Index) -> impl Iterator<Item = (Index, &Node)> + '_ {
        self.get_node(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&c| self.get_node(c).map(|n| (c, n)))
    }

    /// First element whose tag names `section`, in document order.
    ///
    /// For a scoped query this is the root itself.
    #[instrument(level = "trace", skip(self))]
    pub fn section_root(&self, section: Section) -> Option<Index> {
        self.iter()
            .find(|(_, node)| node.tag == section.as_str())
            .map(|(idx, _)| idx)
    }

    /// Pre-order traversal of `section`; empty when the section is absent.
    pub fn iter_section(&self, section: Section) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.section_root(section))
    }

    /// Distinct permitted section names present in the document, first-seen order.
    #[instrument(level = "debug", skip(self))]
    pub fn section_names(&self) -> IndexSet<Section> {
        self.iter()
            .filter_map(|(_, node)| Section::from_tag(&node.tag))
            .collect()
    }

    /// Longest root-to-leaf path length; 0 for an empty document.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&c| (c, depth + 1)));
            }
        }
        max_depth
    }
}

/// Stack-driven pre-order iterator; bounded only by the document's real depth.
pub struct PreOrderIter<'a> {
    doc: &'a ConfigDocument,
    stack: Vec<Index>,
}

impl<'a> PreOrderIter<'a> {
    fn new(doc: &'a ConfigDocument, start: Option<Index>) -> Self {
        Self {
            doc,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (Index, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.doc.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
