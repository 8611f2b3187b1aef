//! Formatter and link callbacks shared by all renderers
//!
//! Each renderer has a complete [`FormatterSet`] of defaults. Callers can
//! replace individual entries through [`FormatOverrides`]; missing entries are
//! filled from the defaults by [`FormatOverrides::merge`] when rendering.
//!
//! Links to plugins, options and return values are not known to this crate.
//! Callers supply them through [`LinkProviders`].

use plugdoc_parser::markup::{OptionLike, PluginIdentifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Formats one string payload: text, code, an error message, ...
pub type TextFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;
/// Formats a payload with two strings: `(text, url)` or `(text, reference)`.
pub type PairFormatter = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;
pub type LineFormatter = Arc<dyn Fn() -> String + Send + Sync>;
/// Formats a module FQCN with its resolved link, if any.
pub type ModuleFormatter = Arc<dyn Fn(&str, Option<&str>) -> String + Send + Sync>;
pub type PluginFormatter = Arc<dyn Fn(&PluginIdentifier, Option<&str>) -> String + Send + Sync>;
pub type OptionLikeFormatter = Arc<dyn Fn(&OptionLike, Option<&str>) -> String + Send + Sync>;

pub type PluginLink = Arc<dyn Fn(&PluginIdentifier) -> Option<String> + Send + Sync>;
/// `(plugin, entrypoint, kind, link_path, is_current_plugin) -> url`
pub type PluginOptionLikeLink = Arc<
    dyn Fn(&PluginIdentifier, Option<&str>, OptionLikeKind, &[String], bool) -> Option<String>
        + Send
        + Sync,
>;

/// Which kind of option-like reference a link is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionLikeKind {
    Option,
    #[serde(rename = "retval")]
    ReturnValue,
}

impl OptionLikeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionLikeKind::Option => "option",
            OptionLikeKind::ReturnValue => "retval",
        }
    }
}

impl fmt::Display for OptionLikeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One formatter per part kind.
#[derive(Clone)]
pub struct FormatterSet {
    pub error: TextFormatter,
    pub bold: TextFormatter,
    pub code: TextFormatter,
    pub horizontal_line: LineFormatter,
    pub italic: TextFormatter,
    pub link: PairFormatter,
    pub module: ModuleFormatter,
    pub doc_ref: PairFormatter,
    pub url: TextFormatter,
    pub text: TextFormatter,
    pub env_variable: TextFormatter,
    pub option_name: OptionLikeFormatter,
    pub option_value: TextFormatter,
    pub plugin: PluginFormatter,
    pub return_value: OptionLikeFormatter,
}

/// Caller replacements for some of the formatters of a [`FormatterSet`].
#[derive(Clone, Default)]
pub struct FormatOverrides {
    pub error: Option<TextFormatter>,
    pub bold: Option<TextFormatter>,
    pub code: Option<TextFormatter>,
    pub horizontal_line: Option<LineFormatter>,
    pub italic: Option<TextFormatter>,
    pub link: Option<PairFormatter>,
    pub module: Option<ModuleFormatter>,
    pub doc_ref: Option<PairFormatter>,
    pub url: Option<TextFormatter>,
    pub text: Option<TextFormatter>,
    pub env_variable: Option<TextFormatter>,
    pub option_name: Option<OptionLikeFormatter>,
    pub option_value: Option<TextFormatter>,
    pub plugin: Option<PluginFormatter>,
    pub return_value: Option<OptionLikeFormatter>,
}

impl FormatOverrides {
    /// Complete set: every override that is set, defaults for the rest.
    pub fn merge(&self, defaults: FormatterSet) -> FormatterSet {
        fn pick<T: Clone>(preferred: &Option<T>, fallback: T) -> T {
            preferred.clone().unwrap_or(fallback)
        }
        FormatterSet {
            error: pick(&self.error, defaults.error),
            bold: pick(&self.bold, defaults.bold),
            code: pick(&self.code, defaults.code),
            horizontal_line: pick(&self.horizontal_line, defaults.horizontal_line),
            italic: pick(&self.italic, defaults.italic),
            link: pick(&self.link, defaults.link),
            module: pick(&self.module, defaults.module),
            doc_ref: pick(&self.doc_ref, defaults.doc_ref),
            url: pick(&self.url, defaults.url),
            text: pick(&self.text, defaults.text),
            env_variable: pick(&self.env_variable, defaults.env_variable),
            option_name: pick(&self.option_name, defaults.option_name),
            option_value: pick(&self.option_value, defaults.option_value),
            plugin: pick(&self.plugin, defaults.plugin),
            return_value: pick(&self.return_value, defaults.return_value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none()
            && self.bold.is_none()
            && self.code.is_none()
            && self.horizontal_line.is_none()
            && self.italic.is_none()
            && self.link.is_none()
            && self.module.is_none()
            && self.doc_ref.is_none()
            && self.url.is_none()
            && self.text.is_none()
            && self.env_variable.is_none()
            && self.option_name.is_none()
            && self.option_value.is_none()
            && self.plugin.is_none()
            && self.return_value.is_none()
    }
}

impl fmt::Debug for FormatOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOverrides")
            .field("is_empty", &self.is_empty())
            .finish_non_exhaustive()
    }
}

/// Link resolution supplied by the caller.
#[derive(Clone, Default)]
pub struct LinkProviders {
    pub plugin_link: Option<PluginLink>,
    pub plugin_option_like_link: Option<PluginOptionLikeLink>,
}

impl LinkProviders {
    pub fn with_plugin_link<F>(mut self, link: F) -> Self
    where
        F: Fn(&PluginIdentifier) -> Option<String> + Send + Sync + 'static,
    {
        self.plugin_link = Some(Arc::new(link));
        self
    }

    pub fn with_plugin_option_like_link<F>(mut self, link: F) -> Self
    where
        F: Fn(&PluginIdentifier, Option<&str>, OptionLikeKind, &[String], bool) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        self.plugin_option_like_link = Some(Arc::new(link));
        self
    }
}

impl fmt::Debug for LinkProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkProviders")
            .field("plugin_link", &self.plugin_link.is_some())
            .field(
                "plugin_option_like_link",
                &self.plugin_option_like_link.is_some(),
            )
            .finish()
    }
}
