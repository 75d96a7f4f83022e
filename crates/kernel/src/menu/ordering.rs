//! Sibling ordering.
//!
//! Siblings are sorted by weight (lower = earlier). Equal weights keep
//! registration order, so the result is the same in every build no matter
//! how the registry iterates.

use super::tree::TreeNode;

/// Sort key of a node: effective weight, then registration sequence.
pub fn sort_key(node: &TreeNode) -> (i32, u64) {
    (node.weight(), node.seq)
}

/// Order siblings in place.
pub fn order(siblings: &mut [TreeNode]) {
    siblings.sort_by_key(sort_key);
}
