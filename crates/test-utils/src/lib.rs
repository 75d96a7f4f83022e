//! Sentiero test utilities.
//!
//! Helpers for integration testing: sample menus, a switchable test user
//! for role-gated visibility, and tree assertion helpers.

use std::sync::Arc;

use parking_lot::RwLock;
use sentiero_kernel::menu::{ItemContext, Menu, MenuBuilder, MenuItem};

/// Build the nested sample menu used throughout the docs:
///
/// ```text
/// menu.root
///   foo, bar          (href)
///   baz
///     qux, quux       (href)
/// ```
pub fn nested_menu() -> Menu {
    let mut builder = MenuBuilder::new();
    let result = builder
        .menu_item("menu.root", MenuItem::new().text("Root"))
        .and_then(|b| b.menu_item("menu.root.foo", MenuItem::new().text("Foo").href("/foo")))
        .and_then(|b| b.menu_item("menu.root.bar", MenuItem::new().text("Bar").href("/bar")))
        .and_then(|b| b.menu_item("menu.root.baz", MenuItem::new().text("Baz")))
        .and_then(|b| b.menu_item("menu.root.baz.qux", MenuItem::new().text("Qux").href("/qux")))
        .and_then(|b| {
            b.menu_item(
                "menu.root.baz.quux",
                MenuItem::new().text("Quux").href("/quux"),
            )
        });
    if let Err(e) = result {
        panic!("sample menu names are valid: {e}");
    }
    match builder.build() {
        Ok(menu) => menu,
        Err(e) => panic!("sample menu builds: {e}"),
    }
}

/// Register `items` on a fresh menu, in order.
pub fn menu_with(items: Vec<(&str, MenuItem)>) -> Menu {
    let menu = Menu::new();
    for (name, item) in items {
        if let Err(e) = menu.set_menu_item(name, item) {
            panic!("failed to register '{name}': {e}");
        }
    }
    menu
}

/// A user whose roles can change while a menu holds predicates on it.
#[derive(Debug, Clone, Default)]
pub struct TestUser {
    roles: Arc<RwLock<Vec<String>>>,
}

impl TestUser {
    /// A user without roles.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A user with the given roles.
    pub fn with_roles(roles: &[&str]) -> Self {
        let user = Self::default();
        for role in roles {
            user.grant(role);
        }
        user
    }

    /// Add a role.
    pub fn grant(&self, role: &str) {
        let mut roles = self.roles.write();
        if !roles.iter().any(|r| r == role) {
            roles.push(role.to_string());
        }
    }

    /// Remove a role.
    pub fn revoke(&self, role: &str) {
        self.roles.write().retain(|r| r != role);
    }

    /// Check if user has a role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.read().iter().any(|r| r == role)
    }

    /// Visibility predicate that shows an item only to users with `role`.
    pub fn requires_role(
        &self,
        role: &str,
    ) -> impl Fn(&ItemContext<'_>) -> bool + Send + Sync + 'static {
        let user = self.clone();
        let role = role.to_string();
        move |_: &ItemContext<'_>| user.has_role(&role)
    }
}

/// Assertion helpers for menu trees and CLI output.
pub mod assert {
    use sentiero_kernel::menu::TreeNode;

    /// Assert the direct children of a node, by segment, in order.
    pub fn children(node: &TreeNode, expected: &[&str]) {
        assert_eq!(
            node.child_segments(),
            expected,
            "unexpected children of '{}'",
            node.name
        );
    }

    /// Assert the direct children of the node at `name` below `tree`.
    pub fn children_of(tree: &TreeNode, name: &str, expected: &[&str]) {
        match tree.find(name) {
            Some(node) => children(node, expected),
            None => panic!("Expected '{}' in tree rooted at '{}'", name, tree.name),
        }
    }

    /// Assert that a name is absent from the tree.
    pub fn absent(tree: &TreeNode, name: &str) {
        assert!(
            tree.find(name).is_none(),
            "Expected '{}' to be pruned from tree rooted at '{}'",
            name,
            tree.name
        );
    }

    /// Assert that rendered menu output mentions `needle`.
    pub fn contains(output: &str, needle: &str) {
        assert!(
            output.contains(needle),
            "expected output to mention '{needle}', got:\n{output}"
        );
    }

    /// Assert that rendered menu output never mentions `needle`.
    pub fn not_contains(output: &str, needle: &str) {
        assert!(
            !output.contains(needle),
            "expected output not to mention '{needle}', got:\n{output}"
        );
    }
}

/// Menu definition documents for testing.
pub mod definitions {
    use serde_json::json;

    /// A main navigation menu with a hidden admin item.
    pub fn main_menu() -> String {
        json!({
            "iconBaseClass": "fa",
            "defaultIconClassPrefix": "fa",
            "items": [
                {"name": "main.home", "text": "Home", "href": "/home", "iconClass": "fa-home"},
                {"name": "main.logout", "text": "Logout", "href": "/logout", "weight": 5},
                {"name": "main.admin", "text": "Admin", "state": "admin", "isVisible": false},
                {"name": "main.language", "text": "Language"},
                {"name": "main.language.en", "text": "English", "state": "lang-en"},
                {"name": "main.language.de", "text": "Deutsch", "state": "lang-de"}
            ]
        })
        .to_string()
    }

    /// A footer menu given as a bare item array.
    pub fn footer_menu() -> String {
        json!([
            {"name": "footer.about", "text": "About", "href": "/about"},
            {"name": "footer.sep", "isDivider": true, "weight": 10},
            {"name": "footer.legal", "text": "Legal", "href": "/legal", "target": "_blank"}
        ])
        .to_string()
    }
}
