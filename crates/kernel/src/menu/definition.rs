//! Declarative menu item definitions.
//!
//! Menus can be described in JSON, either as a bare array of items or as a
//! document that also carries icon settings:
//!
//! ```json
//! {
//!   "iconBaseClass": "fa",
//!   "items": [
//!     { "name": "main.home", "text": "Home", "href": "/home", "weight": -1 },
//!     { "name": "main.admin", "text": "Admin", "state": "admin", "isVisible": false }
//!   ]
//! }
//! ```
//!
//! Only data fields can be declared this way; `click` callbacks and
//! visibility predicates are attached in code. Unknown keys are rejected,
//! so a misspelt field fails the load instead of being dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::item::{MenuItem, Visibility};
use crate::error::{MenuError, MenuResult};

/// Data-only form of a menu item, as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuItemDefinition {
    /// Dotted name of the item.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    /// Constant visibility. Predicates cannot be expressed in JSON.
    #[serde(default, alias = "is_visible", skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(default, alias = "is_divider", skip_serializing_if = "is_false")]
    pub is_divider: bool,
    #[serde(default, alias = "is_collapsed", skip_serializing_if = "is_false")]
    pub is_collapsed: bool,
    #[serde(default, alias = "icon_class", skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,
    /// Set when the item has a click callback. Accepted but ignored on
    /// input, so printed definitions load back.
    #[serde(default, alias = "has_click", skip_serializing_if = "is_false")]
    pub has_click: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl MenuItemDefinition {
    /// Describe a registered item.
    ///
    /// Predicate visibility has no data form and is reported as unset.
    pub fn from_item(name: impl Into<String>, item: &MenuItem) -> Self {
        let is_visible = match &item.is_visible {
            Some(Visibility::Constant(value)) => Some(*value),
            _ => None,
        };
        Self {
            name: name.into(),
            text: item.text.clone(),
            href: item.href.clone(),
            target: item.target.clone(),
            state: item.state.clone(),
            weight: item.weight,
            is_visible,
            is_divider: item.is_divider,
            is_collapsed: item.is_collapsed,
            icon_class: item.icon_class.clone(),
            has_click: item.click.is_some(),
        }
    }

    /// Split into the registry name and the item definition.
    pub fn into_item(self) -> (String, MenuItem) {
        let item = MenuItem {
            text: self.text,
            href: self.href,
            target: self.target,
            click: None,
            state: self.state,
            weight: self.weight,
            is_visible: self.is_visible.map(Visibility::Constant),
            is_divider: self.is_divider,
            is_collapsed: self.is_collapsed,
            icon_class: self.icon_class,
        };
        (self.name, item)
    }
}

/// A menu definition document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuFile {
    #[serde(default, alias = "icon_base_class", skip_serializing_if = "Option::is_none")]
    pub icon_base_class: Option<String>,
    #[serde(
        default,
        alias = "default_icon_class_prefix",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_icon_class_prefix: Option<String>,
    #[serde(default)]
    pub items: Vec<MenuItemDefinition>,
}

impl MenuFile {
    /// Parse a JSON document. `source_name` only labels errors.
    ///
    /// The top-level shape picks the form: an array is a bare item list, an
    /// object is a full document. Field errors keep serde's message and
    /// position.
    pub fn from_json(source_name: &str, json: &str) -> MenuResult<Self> {
        let invalid = |e: serde_json::Error| MenuError::invalid_definition(source_name, e);

        let value: Value = serde_json::from_str(json).map_err(invalid)?;
        match value {
            Value::Array(_) => {
                let items: Vec<MenuItemDefinition> = serde_json::from_str(json).map_err(invalid)?;
                Ok(Self {
                    items,
                    ..Self::default()
                })
            }
            Value::Object(_) => serde_json::from_str(json).map_err(invalid),
            other => Err(MenuError::invalid_definition(
                source_name,
                format!(
                    "expected an item array or a menu document, found {}",
                    json_kind(&other)
                ),
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
