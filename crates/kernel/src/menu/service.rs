//! Menu builder and menu service.
//!
//! Menus are set up in two phases. During startup a [`MenuBuilder`]
//! collects item configurations and icon settings; [`MenuBuilder::build`]
//! then produces the [`Menu`] service that the rest of the application
//! queries. Items can still be added through the service afterwards, but
//! that late-add path is meant for contextual wiring, not initial setup.
//!
//! ```
//! use sentiero_kernel::menu::{MenuBuilder, MenuItem};
//!
//! # fn main() -> Result<(), sentiero_kernel::MenuError> {
//! let mut builder = MenuBuilder::new();
//! builder
//!     .menu_item("foo.home", MenuItem::new().text("Home").href("/home"))?
//!     .menu_item("foo.logout", MenuItem::new().text("Logout"))?;
//! let menu = builder.build()?;
//!
//! // Attach behaviour once the service exists.
//! if let Some(logout) = menu.menu_item("foo.logout") {
//!     logout.write().state = Some("logout".to_string());
//! }
//!
//! let tree = menu.menu_item_tree("foo")?;
//! assert_eq!(tree.child_segments(), vec!["home", "logout"]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::definition::MenuFile;
use super::item::{MenuItem, MenuItemHandle, Visibility};
use super::path;
use super::registry::ItemRegistry;
use super::tree::{self, TreeNode};
use super::visibility;
use crate::error::MenuResult;

/// Icon base class used when none is configured.
pub const DEFAULT_ICON_BASE_CLASS: &str = "glyphicon";

/// Default icon class prefix used when none is configured.
pub const DEFAULT_ICON_CLASS_PREFIX: &str = "glyphicon";

/// Process-wide icon settings. Stored for the renderer, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSettings {
    pub base_class: String,
    pub default_class_prefix: String,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            base_class: DEFAULT_ICON_BASE_CLASS.to_string(),
            default_class_prefix: DEFAULT_ICON_CLASS_PREFIX.to_string(),
        }
    }
}

/// Startup-phase collector of menu item configurations.
#[derive(Debug, Default)]
pub struct MenuBuilder {
    icons: IconSettings,
    items: Vec<(String, MenuItem)>,
    index: HashMap<String, usize>,
}

impl MenuBuilder {
    /// Create an empty builder with default icon settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a menu item.
    ///
    /// The configuration is stored as given; the default visibility rule is
    /// applied when the menu is built. Replacing keeps the original
    /// registration position.
    pub fn menu_item(&mut self, name: &str, item: MenuItem) -> MenuResult<&mut Self> {
        path::validate(name)?;

        match self.index.get(name).copied() {
            Some(position) => self.items[position].1 = item,
            None => {
                self.index.insert(name.to_string(), self.items.len());
                self.items.push((name.to_string(), item));
            }
        }
        Ok(self)
    }

    /// Icon base class handed to the renderer.
    pub fn icon_base_class(&self) -> &str {
        &self.icons.base_class
    }

    pub fn set_icon_base_class(&mut self, value: impl Into<String>) -> &mut Self {
        self.icons.base_class = value.into();
        self
    }

    /// Class prefix for icons a renderer provides by default.
    pub fn default_icon_class_prefix(&self) -> &str {
        &self.icons.default_class_prefix
    }

    pub fn set_default_icon_class_prefix(&mut self, value: impl Into<String>) -> &mut Self {
        self.icons.default_class_prefix = value.into();
        self
    }

    /// Register every item of a JSON definition document, in order.
    ///
    /// Icon settings present in the document override the current ones once
    /// all of its items are registered. Nothing is registered when the
    /// document does not parse; a malformed item name stops the load at that
    /// item and leaves the icon settings untouched.
    pub fn load_json(&mut self, source_name: &str, json: &str) -> MenuResult<&mut Self> {
        let file = MenuFile::from_json(source_name, json)?;

        let count = file.items.len();
        for definition in file.items {
            let (name, item) = definition.into_item();
            self.menu_item(&name, item)?;
        }

        if let Some(base_class) = file.icon_base_class {
            self.set_icon_base_class(base_class);
        }
        if let Some(prefix) = file.default_icon_class_prefix {
            self.set_default_icon_class_prefix(prefix);
        }
        debug!(source = source_name, items = count, "loaded menu definitions");
        Ok(self)
    }

    /// Create a builder from several JSON sources.
    ///
    /// Each element is a `(source_name, json)` tuple. Sources that fail to
    /// load are logged and skipped.
    pub fn from_sources(sources: Vec<(String, String)>) -> Self {
        let mut builder = Self::new();

        for (source_name, json) in sources {
            if let Err(e) = builder.load_json(&source_name, &json) {
                warn!(
                    source = %source_name,
                    error = %e,
                    "failed to load menu definitions"
                );
            }
        }

        builder
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if no items are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finish setup and produce the menu service.
    ///
    /// Items are replayed in registration order through
    /// [`Menu::set_menu_item`].
    pub fn build(self) -> MenuResult<Menu> {
        let menu = Menu::with_icons(self.icons);
        for (name, item) in self.items {
            menu.set_menu_item(&name, item)?;
        }
        debug!(items = menu.len(), "menu service built");
        Ok(menu)
    }
}

/// The menu service.
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    inner: Arc<MenuInner>,
}

#[derive(Debug, Default)]
struct MenuInner {
    registry: RwLock<ItemRegistry>,
    icons: RwLock<IconSettings>,
}

impl Menu {
    /// Create an empty menu with default icon settings.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_icons(icons: IconSettings) -> Self {
        Self {
            inner: Arc::new(MenuInner {
                registry: RwLock::new(ItemRegistry::new()),
                icons: RwLock::new(icons),
            }),
        }
    }

    /// Get the definition registered under `name`.
    pub fn menu_item(&self, name: &str) -> Option<MenuItemHandle> {
        self.inner.registry.read().get(name)
    }

    /// Register or replace a menu item.
    ///
    /// When the configuration has no visibility rule, the default rule is
    /// attached here. It is re-evaluated on every query, so children added
    /// later still count.
    pub fn set_menu_item(&self, name: &str, mut item: MenuItem) -> MenuResult<&Self> {
        if item.is_visible.is_none() {
            item.is_visible = Some(Visibility::default_rule());
        }
        self.inner.registry.write().set(name, item)?;
        Ok(self)
    }

    /// Remove a definition. Registered descendants are kept.
    pub fn remove_menu_item(&self, name: &str) -> Option<MenuItemHandle> {
        self.inner.registry.write().remove(name)
    }

    /// The visible tree rooted at `root`, ordered and pruned.
    ///
    /// The root itself is always returned; check its `visible` flag.
    pub fn menu_item_tree(&self, root: &str) -> MenuResult<TreeNode> {
        let mut tree = self.annotated_tree(root)?;
        visibility::prune(&mut tree);
        Ok(tree)
    }

    /// The full tree rooted at `root` with every node's visibility filled
    /// in, hidden nodes included.
    pub fn annotated_tree(&self, root: &str) -> MenuResult<TreeNode> {
        // Build under the read lock, evaluate after releasing it so that
        // predicates may query the menu.
        let mut tree = {
            let registry = self.inner.registry.read();
            tree::build_subtree(&registry, root)?
        };
        visibility::annotate(&mut tree);
        Ok(tree)
    }

    /// Whether the item (or placeholder) at `name` is currently visible.
    pub fn is_visible(&self, name: &str) -> MenuResult<bool> {
        self.annotated_tree(name).map(|tree| tree.visible)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .registry
            .read()
            .all()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    }

    /// Get item count.
    pub fn len(&self) -> usize {
        self.inner.registry.read().len()
    }

    /// Check if no items are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.registry.read().is_empty()
    }

    /// Icon base class handed to the renderer.
    pub fn icon_base_class(&self) -> String {
        self.inner.icons.read().base_class.clone()
    }

    pub fn set_icon_base_class(&self, value: impl Into<String>) -> &Self {
        self.inner.icons.write().base_class = value.into();
        self
    }

    /// Class prefix for icons a renderer provides by default.
    pub fn default_icon_class_prefix(&self) -> String {
        self.inner.icons.read().default_class_prefix.clone()
    }

    pub fn set_default_icon_class_prefix(&self, value: impl Into<String>) -> &Self {
        self.inner.icons.write().default_class_prefix = value.into();
        self
    }

    /// Snapshot of the icon settings.
    pub fn icon_settings(&self) -> IconSettings {
        self.inner.icons.read().clone()
    }
}
