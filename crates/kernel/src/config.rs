//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::menu::{DEFAULT_ICON_BASE_CLASS, DEFAULT_ICON_CLASS_PREFIX, MenuBuilder};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Icon base class (default: glyphicon).
    pub icon_base_class: String,

    /// Prefix for icons a renderer supplies itself (default: glyphicon).
    pub default_icon_class_prefix: String,

    /// Menu definition files (comma-separated, default: none).
    pub menu_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            icon_base_class: DEFAULT_ICON_BASE_CLASS.to_string(),
            default_icon_class_prefix: DEFAULT_ICON_CLASS_PREFIX.to_string(),
            menu_files: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("{key} must be valid unicode")),
        })
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Result<Option<String>>) -> Result<Self> {
        let icon_base_class = lookup("SENTIERO_ICON_BASE_CLASS")?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON_BASE_CLASS.to_string());

        let default_icon_class_prefix = lookup("SENTIERO_DEFAULT_ICON_CLASS_PREFIX")?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ICON_CLASS_PREFIX.to_string());

        let menu_files: Vec<PathBuf> = lookup("SENTIERO_MENU_FILES")?
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            icon_base_class,
            default_icon_class_prefix,
            menu_files,
        })
    }

    /// A builder preloaded with the configured icon settings.
    pub fn menu_builder(&self) -> MenuBuilder {
        let mut builder = MenuBuilder::new();
        builder
            .set_icon_base_class(self.icon_base_class.clone())
            .set_default_icon_class_prefix(self.default_icon_class_prefix.clone());
        builder
    }
}
