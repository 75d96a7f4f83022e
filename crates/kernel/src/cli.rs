//! CLI command implementations.
//!
//! Commands load menu definitions from JSON files, build the menu service
//! and print what a renderer would receive.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::menu::{Menu, MenuItem, MenuItemDefinition, TreeNode};

/// Build the menu from the configured files followed by `extra_files`.
pub fn load_menu(config: &Config, extra_files: &[PathBuf]) -> Result<Menu> {
    let mut builder = config.menu_builder();

    for path in config.menu_files.iter().chain(extra_files) {
        let source = path.display().to_string();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read menu definitions from {source}"))?;
        builder
            .load_json(&source, &json)
            .with_context(|| format!("failed to load menu definitions from {source}"))?;
    }

    info!(items = builder.len(), "menu definitions loaded");
    builder.build().context("failed to build menu")
}

/// Print the tree rooted at `root`. With `show_hidden`, invisible nodes are
/// printed too and marked.
pub fn cmd_tree(menu: &Menu, root: &str, show_hidden: bool) -> Result<()> {
    print!("{}", tree_output(menu, root, show_hidden)?);
    Ok(())
}

/// Print one definition as JSON.
pub fn cmd_item(menu: &Menu, name: &str) -> Result<()> {
    println!("{}", item_output(menu, name)?);
    Ok(())
}

/// List registered names.
pub fn cmd_names(menu: &Menu) -> Result<()> {
    print!("{}", names_output(menu));
    Ok(())
}

/// Text printed by the `tree` command.
pub fn tree_output(menu: &Menu, root: &str, show_hidden: bool) -> Result<String> {
    let tree = if show_hidden {
        menu.annotated_tree(root)
    } else {
        menu.menu_item_tree(root)
    }
    .with_context(|| format!("failed to build menu tree for '{root}'"))?;

    if !show_hidden && !tree.visible {
        return Ok(format!("Menu '{root}' has no visible items.\n"));
    }
    Ok(render_tree(&tree, show_hidden))
}

/// Text printed by the `item` command.
pub fn item_output(menu: &Menu, name: &str) -> Result<String> {
    let Some(handle) = menu.menu_item(name) else {
        return Ok(format!("Menu item '{name}' not found."));
    };

    let definition = MenuItemDefinition::from_item(name, &handle.read());
    serde_json::to_string_pretty(&definition).context("failed to serialize menu item")
}

/// Text printed by the `names` command.
pub fn names_output(menu: &Menu) -> String {
    let names = menu.names();
    if names.is_empty() {
        return "No menu items registered.\n".to_string();
    }

    names.iter().fold(String::new(), |mut out, name| {
        let _ = writeln!(out, "{name}");
        out
    })
}

/// Render a tree as indented text, one node per line.
pub fn render_tree(tree: &TreeNode, show_hidden: bool) -> String {
    let mut out = String::new();
    render_node(&mut out, tree, 0, show_hidden);
    out
}

fn render_node(out: &mut String, node: &TreeNode, depth: usize, show_hidden: bool) {
    let _ = write!(out, "{}{}", "  ".repeat(depth), node.segment());

    match &node.definition {
        Some(item) => describe(out, item, !node.children.is_empty()),
        None => out.push_str(" (placeholder)"),
    }
    if show_hidden && !node.visible {
        out.push_str(" (hidden)");
    }
    out.push('\n');

    for child in &node.children {
        render_node(out, child, depth + 1, show_hidden);
    }
}

fn describe(out: &mut String, item: &MenuItem, has_children: bool) {
    if let Some(text) = &item.text {
        let _ = write!(out, " \"{text}\"");
    }
    if let Some(href) = &item.href {
        let _ = write!(out, " href={href} target={}", item.effective_target());
    }
    if let Some(state) = &item.state {
        let _ = write!(out, " state={state}");
    }
    if item.click.is_some() {
        out.push_str(" click");
    }
    if item.is_divider {
        out.push_str(" divider");
    }
    if let Some(icon) = &item.icon_class {
        let _ = write!(out, " icon={icon}");
    }
    if has_children && item.is_collapsed {
        out.push_str(" [collapsed]");
    }
    if let Some(weight) = item.weight {
        let _ = write!(out, " weight={weight}");
    }
}
