//! Item registry - the flat name to definition mapping.
//!
//! The registry is the single source of truth for menu items. Trees are
//! never stored; they are projected from the registry on every query.

use std::collections::HashMap;

use tracing::debug;

use super::item::{MenuItem, MenuItemHandle};
use super::path;
use crate::error::MenuResult;

/// A registered definition together with its registration order.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Order of first registration; kept when the name is re-registered.
    pub seq: u64,
    /// The shared definition.
    pub item: MenuItemHandle,
}

/// Registry of all menu item definitions, indexed by dotted name.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: HashMap<String, RegistryEntry>,
    next_seq: u64,
}

impl ItemRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the definition registered under `name`.
    ///
    /// Replacing writes into the existing handle: the entry keeps its
    /// sequence number and outstanding handles observe the new definition.
    /// Returns `true` when an existing definition was replaced.
    pub fn set(&mut self, name: &str, item: MenuItem) -> MenuResult<bool> {
        path::validate(name)?;

        if let Some(entry) = self.items.get(name) {
            *entry.item.write() = item;
            debug!(name, seq = entry.seq, "replaced menu item");
            return Ok(true);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.insert(
            name.to_string(),
            RegistryEntry {
                seq,
                item: item.into_handle(),
            },
        );
        debug!(name, seq, "registered menu item");
        Ok(false)
    }

    /// Get the definition registered under `name`.
    pub fn get(&self, name: &str) -> Option<MenuItemHandle> {
        self.items.get(name).map(|entry| entry.item.clone())
    }

    /// Get the full entry, including its sequence number.
    pub fn entry(&self, name: &str) -> Option<&RegistryEntry> {
        self.items.get(name)
    }

    /// Remove a definition. Descendants stay registered.
    pub fn remove(&mut self, name: &str) -> Option<MenuItemHandle> {
        let removed = self.items.remove(name).map(|entry| entry.item);
        if removed.is_some() {
            debug!(name, "removed menu item");
        }
        removed
    }

    /// Whether a definition is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// All entries, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.items.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Get item count.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
