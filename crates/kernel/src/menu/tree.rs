//! Tree builder - projects the flat registry into a nested tree.
//!
//! Trees are built on demand and never cached. Each node holds a snapshot of
//! its definition taken at build time, so evaluating the tree afterwards
//! needs no registry lock.

use std::collections::{HashMap, HashSet};

use super::item::MenuItem;
use super::ordering;
use super::path::{self, SEPARATOR};
use super::registry::ItemRegistry;
use crate::error::MenuResult;

/// A node of a built menu tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Full dotted name.
    pub name: String,
    /// Registration order, used as the ordering tie-break. Placeholders
    /// take the smallest sequence number among their registered descendants.
    pub seq: u64,
    /// Definition snapshot; `None` for a name that was never registered.
    pub definition: Option<MenuItem>,
    /// Children in display order.
    pub children: Vec<TreeNode>,
    /// Effective visibility. Filled in by the visibility evaluator.
    pub visible: bool,
}

impl TreeNode {
    /// Create a childless, not yet evaluated node.
    pub fn new(name: impl Into<String>, seq: u64, definition: Option<MenuItem>) -> Self {
        Self {
            name: name.into(),
            seq,
            definition,
            children: Vec::new(),
            visible: false,
        }
    }

    /// The node's own (last) name segment.
    pub fn segment(&self) -> &str {
        self.name
            .rsplit_once(SEPARATOR)
            .map_or(self.name.as_str(), |(_, leaf)| leaf)
    }

    /// Whether this node stands in for an unregistered name.
    pub fn is_placeholder(&self) -> bool {
        self.definition.is_none()
    }

    /// Effective weight; placeholders weigh 0.
    pub fn weight(&self) -> i32 {
        self.definition
            .as_ref()
            .map_or(0, MenuItem::effective_weight)
    }

    /// Direct child by segment.
    pub fn child(&self, segment: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.segment() == segment)
    }

    /// Segments of the direct children, in order.
    pub fn child_segments(&self) -> Vec<&str> {
        self.children.iter().map(TreeNode::segment).collect()
    }

    /// Find a node anywhere in this subtree by full name.
    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        if self.name == name {
            return Some(self);
        }
        if !path::is_descendant_of(name, &self.name) {
            return None;
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Build the tree rooted at `root`.
///
/// The root may be unregistered. Unregistered intermediate names between
/// the root and a registered descendant become placeholder nodes.
pub fn build_subtree(registry: &ItemRegistry, root: &str) -> MenuResult<TreeNode> {
    path::validate(root)?;

    let mut members: Vec<(&str, u64, MenuItem)> = registry
        .all()
        .filter(|(name, _)| *name == root || path::is_descendant_of(name, root))
        .map(|(name, entry)| (name, entry.seq, entry.item.read().clone()))
        .collect();

    // Walking in registration order means the first descendant to create a
    // placeholder has the smallest sequence number.
    members.sort_by_key(|(_, seq, _)| *seq);

    let mut nodes: HashMap<String, TreeNode> = HashMap::with_capacity(members.len() + 1);
    let mut edges: HashMap<String, Vec<String>> = HashMap::new();
    let mut linked: HashSet<String> = HashSet::new();

    for (name, seq, item) in &members {
        nodes.insert((*name).to_string(), TreeNode::new(*name, *seq, Some(item.clone())));
    }

    for (name, seq, _) in &members {
        let mut current: &str = name;
        while current != root && linked.insert(current.to_string()) {
            let Some((parent, _)) = current.rsplit_once(SEPARATOR) else {
                break;
            };
            nodes
                .entry(parent.to_string())
                .or_insert_with(|| TreeNode::new(parent, *seq, None));
            edges
                .entry(parent.to_string())
                .or_default()
                .push(current.to_string());
            current = parent;
        }
    }

    let root_node = nodes
        .remove(root)
        .unwrap_or_else(|| TreeNode::new(root, 0, None));
    Ok(attach(root_node, &mut nodes, &mut edges))
}

fn attach(
    mut node: TreeNode,
    nodes: &mut HashMap<String, TreeNode>,
    edges: &mut HashMap<String, Vec<String>>,
) -> TreeNode {
    let child_names = edges.remove(&node.name).unwrap_or_default();
    for name in child_names {
        if let Some(child) = nodes.remove(&name) {
            node.children.push(attach(child, nodes, edges));
        }
    }
    ordering::order(&mut node.children);
    node
}
