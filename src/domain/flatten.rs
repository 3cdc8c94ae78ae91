//! Schema-agnostic views of a whole document: a flat entry list and a
//! nested display tree.

use std::collections::HashMap;

use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{ConfigDocument, Node};
use crate::domain::entities::{Flattened, FlattenedEntry};

/// Flatten `doc` into (tag, attributes) entries in pre-order.
///
/// Group-only elements are walked through but not emitted. `tags` lists the
/// distinct tags of every visited element. An empty document flattens to an
/// empty result.
#[instrument(level = "debug", skip(doc))]
pub fn flatten(doc: &ConfigDocument) -> Flattened {
    let entries = doc
        .iter()
        .map(|(_, node)| node)
        .filter(|node| node.is_attributed())
        .map(|node| FlattenedEntry {
            tag: node.tag.clone(),
            attributes: node.attributes.clone(),
        })
        .collect();

    let tags = doc
        .iter()
        .map(|(_, node)| node.tag.as_str())
        .unique()
        .map(str::to_string)
        .collect();

    Flattened { entries, tags }
}

/// Conversion of a document into a printable tree.
pub trait ToDisplayTree {
    fn to_display_tree(&self) -> Tree<String>;
}

impl ToDisplayTree for ConfigDocument {
    fn to_display_tree(&self) -> Tree<String> {
        fn label(node: &Node) -> String {
            if node.attributes.is_empty() {
                return node.tag.clone();
            }
            let attrs = node
                .attributes
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .join(" ");
            format!("{} [{}]", node.tag, attrs)
        }

        let Some(root) = self.root() else {
            return Tree::new("Empty document".to_string());
        };

        // Children are finished before their parent pops a second time.
        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut stack = vec![(root, false)];
        while let Some((idx, expanded)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            if expanded {
                let leaves: Vec<_> = node
                    .children
                    .iter()
                    .filter_map(|c| built.remove(c))
                    .collect();
                built.insert(idx, Tree::new(label(node)).with_leaves(leaves));
            } else {
                stack.push((idx, true));
                stack.extend(node.children.iter().map(|&c| (c, false)));
            }
        }

        built
            .remove(&root)
            .unwrap_or_else(|| Tree::new("Empty document".to_string()))
    }
}
