//! Menu system built from dotted item names.
//!
//! Items are registered under names such as `"main.admin.users"` and
//! assembled on demand into ordered trees:
//! - `path`: dotted name parsing
//! - `registry`: the flat name to definition mapping
//! - `tree` and `ordering`: tree projection and sibling order
//! - `visibility`: bottom-up visibility rules
//! - `service`: the builder / service pair consumers use

mod definition;
mod item;
pub mod path;
mod registry;
mod service;
mod tree;

pub mod ordering;
pub mod visibility;

pub use definition::{MenuFile, MenuItemDefinition};
pub use item::{
    ClickHandler, DEFAULT_TARGET, ItemContext, MenuItem, MenuItemHandle, Visibility, VisibilityFn,
    default_rule,
};
pub use registry::{ItemRegistry, RegistryEntry};
pub use service::{
    DEFAULT_ICON_BASE_CLASS, DEFAULT_ICON_CLASS_PREFIX, IconSettings, Menu, MenuBuilder,
};
pub use tree::{TreeNode, build_subtree};
