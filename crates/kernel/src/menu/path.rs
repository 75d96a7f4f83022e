//! Dotted menu item names.
//!
//! A name such as `"menu.root.baz"` is split on `.` into segments; the
//! parent of an item is the name formed by every segment but the last.
//! Hierarchy is derived purely from the string, so a name can never be its
//! own ancestor.

use crate::error::{MenuError, MenuResult};

/// Separator between hierarchy levels.
pub const SEPARATOR: char = '.';

/// Split a name into its non-empty segments.
///
/// Fails on the empty string and on any empty segment (leading, trailing or
/// consecutive dots).
pub fn segments(name: &str) -> MenuResult<Vec<&str>> {
    if name.is_empty() {
        return Err(MenuError::malformed(name, "name is empty"));
    }

    let parts: Vec<&str> = name.split(SEPARATOR).collect();
    if let Some(index) = parts.iter().position(|s| s.is_empty()) {
        return Err(MenuError::malformed(
            name,
            format!("segment {} is empty", index + 1),
        ));
    }

    Ok(parts)
}

/// Check that a name is well formed without allocating its segments.
pub fn validate(name: &str) -> MenuResult<()> {
    segments(name).map(|_| ())
}

/// The parent name, or `None` for a root-level (single segment) name.
pub fn parent_name(name: &str) -> MenuResult<Option<&str>> {
    validate(name)?;
    Ok(name.rsplit_once(SEPARATOR).map(|(parent, _)| parent))
}

/// The item's own (last) segment.
pub fn leaf_segment(name: &str) -> MenuResult<&str> {
    validate(name)?;
    Ok(name.rsplit_once(SEPARATOR).map_or(name, |(_, leaf)| leaf))
}

/// Number of segments in a name. Diagnostic only; never used for ordering.
pub fn depth(name: &str) -> MenuResult<usize> {
    segments(name).map(|s| s.len())
}

/// Whether `name` lies strictly below `ancestor` in the hierarchy.
///
/// Both names are assumed valid. `"m.ab"` is not below `"m.a"`.
pub fn is_descendant_of(name: &str, ancestor: &str) -> bool {
    name.len() > ancestor.len()
        && name.starts_with(ancestor)
        && name[ancestor.len()..].starts_with(SEPARATOR)
}
