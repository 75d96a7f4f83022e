//! Menu item definitions.
//!
//! A [`MenuItem`] is the configuration registered under a dotted name. The
//! name itself is the registry key and is not stored on the item.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;

/// Link target used when `href` is set without a `target`.
pub const DEFAULT_TARGET: &str = "_self";

/// Shared, mutable handle to a registered definition.
///
/// Collaborators may write through a handle at any time (for example to
/// attach a `click` callback after startup); the next tree query sees it.
pub type MenuItemHandle = Arc<RwLock<MenuItem>>;

/// Signature of a visibility predicate.
pub type VisibilityFn = dyn Fn(&ItemContext<'_>) -> bool + Send + Sync;

/// Visibility rule of a menu item.
#[derive(Clone)]
pub enum Visibility {
    /// Always the given value.
    Constant(bool),
    /// Evaluated on every query against the item's own fields.
    Predicate(Arc<VisibilityFn>),
}

impl Visibility {
    /// Wrap a closure as a predicate rule.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&ItemContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// The rule applied to items registered without an explicit one.
    pub fn default_rule() -> Self {
        Self::predicate(default_rule)
    }

    /// Evaluate the rule for an item.
    pub fn evaluate(&self, ctx: &ItemContext<'_>) -> bool {
        match self {
            Self::Constant(value) => *value,
            Self::Predicate(f) => f(ctx),
        }
    }
}

impl From<bool> for Visibility {
    fn from(value: bool) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Visible if any child is visible, or the item has an action, or it is a
/// divider.
pub fn default_rule(ctx: &ItemContext<'_>) -> bool {
    ctx.has_visible_children() || ctx.has_action() || ctx.is_divider
}

/// What a visibility predicate sees: the item's own definition and whether
/// any of its direct children is visible.
///
/// Dereferences to [`MenuItem`], so `ctx.href`, `ctx.state` etc. read the
/// item's fields.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    item: &'a MenuItem,
    has_visible_children: bool,
}

impl<'a> ItemContext<'a> {
    pub fn new(item: &'a MenuItem, has_visible_children: bool) -> Self {
        Self {
            item,
            has_visible_children,
        }
    }

    /// Whether at least one direct child evaluated visible.
    pub fn has_visible_children(&self) -> bool {
        self.has_visible_children
    }
}

impl Deref for ItemContext<'_> {
    type Target = MenuItem;

    fn deref(&self) -> &MenuItem {
        self.item
    }
}

/// Zero-argument callback invoked when a `click` item is activated.
#[derive(Clone)]
pub struct ClickHandler(Arc<dyn Fn() + Send + Sync>);

impl ClickHandler {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

/// Configuration of a single menu item.
///
/// `href`, `click` and `state` are meant to be mutually exclusive, and a
/// parent is not meant to carry any of them. Neither is enforced here.
#[derive(Debug, Clone, Default)]
pub struct MenuItem {
    /// Display label, passed through to translation untouched.
    pub text: Option<String>,
    /// Hyperlink destination.
    pub href: Option<String>,
    /// Hyperlink target; [`DEFAULT_TARGET`] when unset.
    pub target: Option<String>,
    /// Callback for click-driven items.
    pub click: Option<ClickHandler>,
    /// Router state name.
    pub state: Option<String>,
    /// Sort weight (lower = earlier). Treated as 0 when unset.
    pub weight: Option<i32>,
    /// Visibility rule; the default rule applies when unset.
    pub is_visible: Option<Visibility>,
    /// Visual separator, visible without an action.
    pub is_divider: bool,
    /// Collapse state of a parent. Inert on leaves.
    pub is_collapsed: bool,
    /// Icon class, combined with the icon base class by the renderer.
    pub icon_class: Option<String>,
}

impl MenuItem {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn click<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.click = Some(ClickHandler::new(f));
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set a constant visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.is_visible = Some(Visibility::Constant(visible));
        self
    }

    /// Set a predicate visibility.
    pub fn visible_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&ItemContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.is_visible = Some(Visibility::predicate(f));
        self
    }

    pub fn divider(mut self) -> Self {
        self.is_divider = true;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.is_collapsed = collapsed;
        self
    }

    pub fn icon_class(mut self, icon_class: impl Into<String>) -> Self {
        self.icon_class = Some(icon_class.into());
        self
    }

    /// Weight used for ordering.
    pub fn effective_weight(&self) -> i32 {
        self.weight.unwrap_or(0)
    }

    /// Link target, defaulting to `_self`.
    pub fn effective_target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    /// Whether any of href, click or state is set.
    pub fn has_action(&self) -> bool {
        self.href.is_some() || self.click.is_some() || self.state.is_some()
    }

    /// Invoke the click callback, if any. Returns whether one ran.
    pub fn invoke_click(&self) -> bool {
        match &self.click {
            Some(handler) => {
                handler.call();
                true
            }
            None => false,
        }
    }

    /// Wrap the definition in a shared handle.
    pub fn into_handle(self) -> MenuItemHandle {
        Arc::new(RwLock::new(self))
    }
}
