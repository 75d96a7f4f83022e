//! Menu error types with clear, actionable messages.
//!
//! Every error names the offending menu item or definition source so the
//! caller can fix its configuration without guessing.

use thiserror::Error;

/// Errors that can occur while registering or querying menu items.
///
/// Looking up a name that was never registered is not an error; lookups
/// return `Option` instead.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The dotted name is empty or has an empty segment.
    #[error("menu item name '{name}' is malformed: {reason}")]
    MalformedName { name: String, reason: String },

    /// A JSON definition document could not be parsed.
    #[error("menu definitions from '{source_name}' could not be parsed: {details}")]
    InvalidDefinition {
        source_name: String,
        details: String,
    },
}

impl MenuError {
    /// Create a malformed name error.
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid definition error.
    pub fn invalid_definition(source_name: impl Into<String>, details: impl ToString) -> Self {
        Self::InvalidDefinition {
            source_name: source_name.into(),
            details: details.to_string(),
        }
    }
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
