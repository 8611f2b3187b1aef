//! Parser options
//!
//! All fields have defaults, so `ParsingOptions::default()` parses semantic
//! markup, reports failures inline and leaves whitespace alone. The struct
//! deserializes from any serde format with missing keys taking their defaults.

use super::ast::PluginIdentifier;
use serde::{Deserialize, Serialize};

/// What happens to a command that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Drop the command and its consumed input.
    Ignore,
    /// Emit an error part in place of the command.
    #[default]
    Message,
    /// Abort the whole parse.
    Exception,
}

/// Whitespace normalization applied to text and to some command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Whitespace {
    /// Leave whitespace untouched.
    #[default]
    Ignore,
    /// Collapse whitespace runs to a single space.
    Strip,
    /// Like `Strip`, but runs containing a line break become a single newline.
    KeepSingleNewlines,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingOptions {
    pub errors: ErrorPolicy,
    /// The plugin whose documentation is being parsed. Unqualified `O(...)`
    /// and `RV(...)` references resolve to it.
    pub current_plugin: Option<PluginIdentifier>,
    /// The role entrypoint whose documentation is being parsed.
    pub role_entrypoint: Option<String>,
    /// Only recognize the eight classic commands.
    pub only_classic_markup: bool,
    /// Record the source slice on every part.
    pub add_source: bool,
    /// Quote the offending source in diagnostics instead of the command name.
    pub helpful_errors: bool,
    pub whitespace: Whitespace,
}

impl Default for ParsingOptions {
    fn default() -> Self {
        Self {
            errors: ErrorPolicy::default(),
            current_plugin: None,
            role_entrypoint: None,
            only_classic_markup: false,
            add_source: false,
            helpful_errors: true,
            whitespace: Whitespace::default(),
        }
    }
}

impl ParsingOptions {
    pub fn with_errors(mut self, errors: ErrorPolicy) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_current_plugin(mut self, plugin: PluginIdentifier) -> Self {
        self.current_plugin = Some(plugin);
        self
    }

    pub fn with_role_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.role_entrypoint = Some(entrypoint.into());
        self
    }

    pub fn with_only_classic_markup(mut self, only_classic_markup: bool) -> Self {
        self.only_classic_markup = only_classic_markup;
        self
    }

    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    pub fn with_helpful_errors(mut self, helpful_errors: bool) -> Self {
        self.helpful_errors = helpful_errors;
        self
    }

    pub fn with_whitespace(mut self, whitespace: Whitespace) -> Self {
        self.whitespace = whitespace;
        self
    }
}
