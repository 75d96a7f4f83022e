//! Visibility evaluation.
//!
//! A node's visibility may depend on whether any of its children is
//! visible, so evaluation always runs depth-first, children before parent.
//! Nothing is cached: every query re-evaluates against the current
//! definitions, including predicates.

use super::item::{ItemContext, default_rule};
use super::tree::TreeNode;

/// Whether a node is visible.
///
/// An explicit rule (constant or predicate) always wins. Without one, the
/// default rule applies; a placeholder node is visible iff it has a visible
/// child.
pub fn is_visible(node: &TreeNode) -> bool {
    let visible_children = has_visible_children(node);
    evaluate(node, visible_children)
}

/// Whether any direct child of the node is visible.
pub fn has_visible_children(node: &TreeNode) -> bool {
    node.children.iter().any(is_visible)
}

/// Compute and store the visibility of every node in the subtree.
///
/// Returns the visibility of `node` itself.
pub fn annotate(node: &mut TreeNode) -> bool {
    let mut visible_children = false;
    for child in &mut node.children {
        visible_children |= annotate(child);
    }
    node.visible = evaluate(node, visible_children);
    node.visible
}

/// Drop every invisible descendant. Expects an annotated tree.
pub fn prune(node: &mut TreeNode) {
    node.children.retain(|child| child.visible);
    for child in &mut node.children {
        prune(child);
    }
}

fn evaluate(node: &TreeNode, visible_children: bool) -> bool {
    let Some(item) = &node.definition else {
        return visible_children;
    };
    let ctx = ItemContext::new(item, visible_children);
    match &item.is_visible {
        Some(rule) => rule.evaluate(&ctx),
        None => default_rule(&ctx),
    }
}
