//! Integration tests for the menu service.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test menu_test
//! ```
//!
//! ## Test Coverage
//!
//! - Weight ordering and registration-order tie-break
//! - Default and explicit visibility rules
//! - Replacement of parents with registered children
//! - Runtime mutation through item handles
//! - Two-phase setup (builder, then late additions on the service)
//! - JSON definition loading
//! - CLI output for loaded definitions

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sentiero_kernel::cli;
use sentiero_kernel::menu::{ClickHandler, Menu, MenuBuilder, MenuItem, Visibility};
use sentiero_test_utils::{TestUser, assert, definitions, menu_with, nested_menu};

/// Items are ordered by weight and both are visible.
#[test]
fn weights_order_siblings() {
    let menu = menu_with(vec![
        ("m.logout", MenuItem::new().href("/logout").weight(5)),
        ("m.home", MenuItem::new().href("/home").weight(0)),
    ]);

    let tree = menu.menu_item_tree("m").unwrap();

    assert::children(&tree, &["home", "logout"]);
    assert!(tree.children.iter().all(|c| c.visible));
}

/// An explicit `false` hides an item even though it has an href.
#[test]
fn hidden_item_is_pruned() {
    let menu = menu_with(vec![
        ("m.home", MenuItem::new().href("/home")),
        ("m.admin", MenuItem::new().href("/admin").visible(false)),
    ]);

    let tree = menu.menu_item_tree("m").unwrap();

    assert::children(&tree, &["home"]);
    assert::absent(&tree, "m.admin");
}

/// A parent without an action is visible through its child.
#[test]
fn parent_visible_through_child() {
    let menu = menu_with(vec![
        ("m.parent", MenuItem::new().text("Parent")),
        ("m.parent.child", MenuItem::new().href("/x")),
    ]);

    assert!(menu.is_visible("m.parent").unwrap());
    let tree = menu.menu_item_tree("m").unwrap();
    assert::children_of(&tree, "m.parent", &["child"]);
}

/// Equal weights keep registration order, also after re-registering.
#[test]
fn equal_weights_keep_registration_order() {
    let menu = menu_with(vec![
        ("m.a", MenuItem::new().href("/a").weight(-1)),
        ("m.b", MenuItem::new().href("/b").weight(-1)),
    ]);
    assert::children(&menu.menu_item_tree("m").unwrap(), &["a", "b"]);

    menu.set_menu_item("m.a", MenuItem::new().href("/a").weight(-1))
        .unwrap();

    assert::children(&menu.menu_item_tree("m").unwrap(), &["a", "b"]);
}

/// Ordering does not depend on registration order when weights differ.
#[test]
fn weight_beats_registration_order() {
    let forward = menu_with(vec![
        ("m.light", MenuItem::new().href("/l").weight(-2)),
        ("m.heavy", MenuItem::new().href("/h").weight(2)),
    ]);
    let backward = menu_with(vec![
        ("m.heavy", MenuItem::new().href("/h").weight(2)),
        ("m.light", MenuItem::new().href("/l").weight(-2)),
    ]);

    for menu in [forward, backward] {
        assert::children(&menu.menu_item_tree("m").unwrap(), &["light", "heavy"]);
    }
}

/// Repeated queries without mutation give the same order.
#[test]
fn repeated_queries_are_stable() {
    let menu = nested_menu();
    let first = menu.menu_item_tree("menu").unwrap();
    for _ in 0..5 {
        let again = menu.menu_item_tree("menu").unwrap();
        assert_eq!(
            first.child("root").unwrap().child_segments(),
            again.child("root").unwrap().child_segments()
        );
    }
}

/// A bare item is hidden until it gains a visible child.
#[test]
fn default_rule_flips_with_first_visible_child() {
    let menu = menu_with(vec![("m.group", MenuItem::new().text("Group"))]);
    assert!(!menu.is_visible("m.group").unwrap());
    assert!(menu.menu_item_tree("m").unwrap().children.is_empty());

    menu.set_menu_item("m.group.item", MenuItem::new().state("item"))
        .unwrap();

    assert!(menu.is_visible("m.group").unwrap());
    assert::children_of(&menu.menu_item_tree("m").unwrap(), "m.group", &["item"]);
}

/// Replacing a parent keeps its children attached.
#[test]
fn replacing_parent_keeps_children() {
    let menu = menu_with(vec![
        ("a.b", MenuItem::new().text("Old")),
        ("a.b.c", MenuItem::new().href("/c")),
    ]);

    menu.set_menu_item("a.b", MenuItem::new().text("New"))
        .unwrap();

    let tree = menu.menu_item_tree("a").unwrap();
    let b = tree.child("b").unwrap();
    assert_eq!(b.definition.as_ref().unwrap().text.as_deref(), Some("New"));
    assert::children(b, &["c"]);
}

/// Children may be registered before their parent.
#[test]
fn registration_order_is_unconstrained() {
    let menu = menu_with(vec![
        ("menu.root.baz.qux", MenuItem::new().href("/qux")),
        ("menu.root.foo", MenuItem::new().href("/foo")),
        ("menu.root", MenuItem::new().text("Root")),
        ("menu.root.baz", MenuItem::new().text("Baz")),
    ]);

    let tree = menu.menu_item_tree("menu.root").unwrap();

    // "baz" was registered after "foo", even though "baz.qux" came first.
    assert::children(&tree, &["foo", "baz"]);
    assert::children_of(&tree, "menu.root.baz", &["qux"]);
}

/// Unregistered intermediate names show up as placeholders.
#[test]
fn unregistered_parent_becomes_placeholder() {
    let menu = menu_with(vec![("m.section.page", MenuItem::new().href("/page"))]);

    let tree = menu.menu_item_tree("m").unwrap();
    let section = tree.child("section").unwrap();

    assert!(section.is_placeholder());
    assert!(section.visible);
    assert!(menu.menu_item("m.section").is_none());
}

/// Setting `click` after setup makes a bare item visible on the next query.
#[test]
fn click_attached_at_runtime_is_observed() {
    let mut builder = MenuBuilder::new();
    builder
        .menu_item("foo.logout", MenuItem::new().text("Logout"))
        .unwrap();
    let menu = builder.build().unwrap();
    assert!(menu.menu_item_tree("foo").unwrap().children.is_empty());

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    menu.menu_item("foo.logout").unwrap().write().click = Some(ClickHandler::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let tree = menu.menu_item_tree("foo").unwrap();
    let logout = tree.child("logout").unwrap();
    assert!(logout.definition.as_ref().unwrap().invoke_click());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Text changed through a handle shows up in the next tree.
#[test]
fn text_mutation_through_handle() {
    let menu = nested_menu();
    menu.menu_item("menu.root.foo").unwrap().write().text = Some("New Text".into());

    let tree = menu.menu_item_tree("menu.root").unwrap();
    let foo = tree.child("foo").unwrap().definition.as_ref().unwrap();
    assert_eq!(foo.text.as_deref(), Some("New Text"));
}

/// A role predicate is re-evaluated on every query.
#[test]
fn role_gated_item_follows_the_user() {
    let user = TestUser::anonymous();
    let menu = menu_with(vec![
        ("nav.home", MenuItem::new().href("/home")),
        (
            "nav.admin",
            MenuItem::new()
                .href("/admin")
                .visible_when(user.requires_role("admin")),
        ),
    ]);
    assert::children(&menu.menu_item_tree("nav").unwrap(), &["home"]);

    user.grant("admin");
    assert::children(&menu.menu_item_tree("nav").unwrap(), &["home", "admin"]);

    user.revoke("admin");
    assert::children(&menu.menu_item_tree("nav").unwrap(), &["home"]);
}

/// A predicate on a parent can require visible children explicitly.
#[test]
fn parent_predicate_uses_visible_children() {
    let menu = menu_with(vec![
        (
            "m.tools",
            MenuItem::new()
                .state("tools")
                .visible_when(|ctx| ctx.has_visible_children() && ctx.state.is_some()),
        ),
        ("m.tools.hidden", MenuItem::new().href("/h").visible(false)),
    ]);
    assert!(!menu.is_visible("m.tools").unwrap());

    menu.set_menu_item("m.tools.shown", MenuItem::new().href("/s"))
        .unwrap();
    assert!(menu.is_visible("m.tools").unwrap());
}

/// Late additions on the service join items from setup.
#[test]
fn late_additions_join_setup_items() {
    let menu = nested_menu();
    menu.set_menu_item(
        "menu.root.first",
        MenuItem::new().href("/first").weight(-10),
    )
    .unwrap();

    let tree = menu.menu_item_tree("menu.root").unwrap();
    assert::children(&tree, &["first", "foo", "bar", "baz"]);
}

/// The default rule is not applied over an explicit constant.
#[test]
fn explicit_true_survives_registration() {
    let menu = menu_with(vec![("m.label", MenuItem::new().visible(true))]);
    let handle = menu.menu_item("m.label").unwrap();
    assert!(matches!(
        handle.read().is_visible,
        Some(Visibility::Constant(true))
    ));
    assert!(menu.is_visible("m.label").unwrap());
}

/// A malformed name fails without touching existing items.
#[test]
fn malformed_names_do_not_corrupt_registry() {
    let menu = nested_menu();
    let before = menu.names();

    for name in ["", ".menu", "menu.", "menu..root"] {
        assert!(menu.set_menu_item(name, MenuItem::new()).is_err());
        assert!(menu.menu_item_tree(name).is_err());
    }

    assert_eq!(menu.names(), before);
}

/// Clones of the service share the registry.
#[test]
fn service_clones_share_state() {
    let menu = Menu::new();
    let other = menu.clone();
    other.set_menu_item("m.a", MenuItem::new().href("/a")).unwrap();
    assert!(menu.menu_item("m.a").is_some());
}

/// The service can be shared across threads.
#[test]
fn concurrent_registration_and_queries() {
    let menu = Menu::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let menu = menu.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    menu.set_menu_item(&format!("m.t{t}.i{i}"), MenuItem::new().href("/x"))
                        .unwrap();
                    let _ = menu.menu_item_tree("m").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let tree = menu.menu_item_tree("m").unwrap();
    assert_eq!(tree.children.len(), 4);
    assert_eq!(tree.node_count(), 1 + 4 + 100);
}

/// JSON documents load into a queryable menu.
#[test]
fn json_definitions_build_menu() {
    let mut builder = MenuBuilder::new();
    builder
        .load_json("main.json", &definitions::main_menu())
        .unwrap()
        .load_json("footer.json", &definitions::footer_menu())
        .unwrap();
    let menu = builder.build().unwrap();

    assert_eq!(menu.icon_base_class(), "fa");
    assert_eq!(menu.default_icon_class_prefix(), "fa");

    let main = menu.menu_item_tree("main").unwrap();
    assert::children(&main, &["home", "language", "logout"]);
    assert::children_of(&main, "main.language", &["en", "de"]);

    let footer = menu.menu_item_tree("footer").unwrap();
    assert::children(&footer, &["about", "legal", "sep"]);
    let legal = footer.child("legal").unwrap().definition.as_ref().unwrap();
    assert_eq!(legal.effective_target(), "_blank");
}

/// Broken sources are skipped when loading leniently.
#[test]
fn lenient_loading_skips_broken_sources() {
    let builder = MenuBuilder::from_sources(vec![
        ("main.json".to_string(), definitions::main_menu()),
        ("broken.json".to_string(), "{ nope".to_string()),
    ]);
    let menu = builder.build().unwrap();

    assert_eq!(menu.len(), 6);
}

/// The CLI shows visible items only, unless asked for hidden ones.
#[test]
fn cli_tree_output_for_loaded_definitions() {
    let mut builder = MenuBuilder::new();
    builder
        .load_json("main.json", &definitions::main_menu())
        .unwrap();
    let menu = builder.build().unwrap();

    let visible = cli::tree_output(&menu, "main", false).unwrap();
    assert::contains(&visible, "  home \"Home\" href=/home target=_self icon=fa-home");
    assert::contains(&visible, "    de \"Deutsch\" state=lang-de");
    assert::not_contains(&visible, "admin");

    let all = cli::tree_output(&menu, "main", true).unwrap();
    assert::contains(&all, "admin \"Admin\" state=admin (hidden)");

    let item = cli::item_output(&menu, "main.logout").unwrap();
    assert::contains(&item, "\"weight\": 5");
    assert::not_contains(&item, "hasClick");
}
