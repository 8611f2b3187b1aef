//! Option and return value references
//!
//! Resolves the argument of `O(...)` and `RV(...)`:
//!
//! - `name` / `name=value`: belongs to the current plugin, if any.
//! - `fqcn#type:name`: belongs to the given plugin.
//! - `ignore:name`: explicitly belongs to no plugin.
//! - For roles, the name is prefixed with the entrypoint: `fqcn#role:main:name`.
//!
//! Subscripts such as `foo[0].bar` are part of the name but not of the link
//! path (`["foo", "bar"]`).

use super::ast::{OptionLike, PluginIdentifier};
use super::error::MarkupError;
use super::options::ParsingOptions;
use super::validation::{is_fqcn, is_plugin_type};
use once_cell::sync::Lazy;
use regex::Regex;

const IGNORE_MARKER: &str = "ignore:";

static PLUGIN_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^.]+\.[^.]+\.[^#]+)#([^:]+):([^\n\r\x{2028}\x{2029}]*)$").unwrap());

static SUBSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Resolves an option-like reference against the parsing context.
pub fn parse_option_like(text: &str, options: &ParsingOptions) -> Result<OptionLike, MarkupError> {
    let (text, value) = match text.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (text, None),
    };

    let mut entrypoint = None;
    let (plugin, mut name) = if let Some(captures) = PLUGIN_REFERENCE.captures(text) {
        let fqcn = &captures[1];
        let plugin_type = &captures[2];
        if !is_fqcn(fqcn) {
            return Err(MarkupError::PluginNotFqcn(fqcn.to_string()));
        }
        if !is_plugin_type(plugin_type) {
            return Err(MarkupError::InvalidPluginType(plugin_type.to_string()));
        }
        let name = captures.get(3).map_or("", |m| m.as_str());
        (Some(PluginIdentifier::new(fqcn, plugin_type)), name)
    } else if let Some(name) = text.strip_prefix(IGNORE_MARKER) {
        (None, name)
    } else {
        entrypoint = options.role_entrypoint.clone();
        (options.current_plugin.clone(), text)
    };

    if plugin.as_ref().is_some_and(PluginIdentifier::is_role) {
        if let Some((role_entrypoint, rest)) = name.split_once(':') {
            entrypoint = Some(role_entrypoint.to_string());
            name = rest;
        }
        if entrypoint.is_none() {
            return Err(MarkupError::MissingRoleEntrypoint);
        }
    }

    if name.contains([':', '#']) {
        return Err(MarkupError::InvalidOptionName(name.to_string()));
    }

    Ok(OptionLike {
        plugin,
        entrypoint,
        link_path: link_path(name),
        name: name.to_string(),
        value,
    })
}

/// `name` without `[...]` subscripts, split on `.`.
pub fn link_path(name: &str) -> Vec<String> {
    SUBSCRIPT
        .replace_all(name, "")
        .split('.')
        .map(str::to_string)
        .collect()
}
