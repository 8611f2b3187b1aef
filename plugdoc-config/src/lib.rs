//! Shared configuration loader for plugdoc.
//!
//! `defaults/plugdoc.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`PlugdocConfig`], then turn the sections into parser and renderer options.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use plugdoc_babel::{HtmlOptions, HtmlStyle, RstOptions, RstStyle};
use plugdoc_parser::markup::{ErrorPolicy, ParsingOptions, PluginIdentifier, Whitespace};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/plugdoc.default.toml");

/// Top-level configuration consumed by plugdoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PlugdocConfig {
    pub parsing: ParsingConfig,
    pub html: HtmlConfig,
    pub rst: RstConfig,
}

/// Mirrors the context-free knobs of [`ParsingOptions`]. The current plugin
/// and role entrypoint belong to the document being parsed, not to the
/// configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub errors: ErrorPolicy,
    pub only_classic_markup: bool,
    pub add_source: bool,
    pub helpful_errors: bool,
    pub whitespace: Whitespace,
}

impl ParsingConfig {
    pub fn to_options(&self) -> ParsingOptions {
        ParsingOptions::default()
            .with_errors(self.errors)
            .with_only_classic_markup(self.only_classic_markup)
            .with_add_source(self.add_source)
            .with_helpful_errors(self.helpful_errors)
            .with_whitespace(self.whitespace)
    }

    /// Options for parsing the documentation of `plugin`.
    pub fn to_options_for(&self, plugin: PluginIdentifier) -> ParsingOptions {
        self.to_options().with_current_plugin(plugin)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub style: HtmlStyle,
    pub par_start: String,
    pub par_end: String,
}

impl HtmlConfig {
    pub fn to_options(&self) -> HtmlOptions {
        HtmlOptions {
            style: self.style,
            par_start: self.par_start.clone(),
            par_end: self.par_end.clone(),
            ..HtmlOptions::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RstConfig {
    pub style: RstStyle,
}

impl RstConfig {
    pub fn to_options(&self) -> RstOptions {
        RstOptions {
            style: self.style,
            ..RstOptions::default()
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PlugdocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PlugdocConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.parsing.to_options(), ParsingOptions::default());
        assert_eq!(config.html.style, HtmlStyle::AntsibullDocs);
        assert_eq!(config.html.par_start, "<p>");
        assert_eq!(config.rst.style, RstStyle::AntsibullDocs);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parsing.errors", "exception")
            .expect("override to apply")
            .set_override("parsing.whitespace", "keep_single_newlines")
            .expect("override to apply")
            .set_override("rst.style", "plain")
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = config.parsing.to_options();
        assert_eq!(options.errors, ErrorPolicy::Exception);
        assert_eq!(options.whitespace, Whitespace::KeepSingleNewlines);
        assert_eq!(config.rst.to_options().style, RstStyle::Plain);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[html]\nstyle = \"plain\"\npar_start = \"<div>\"").expect("write");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let html = config.html.to_options();
        assert_eq!(html.style, HtmlStyle::Plain);
        assert_eq!(html.par_start, "<div>");
        assert_eq!(html.par_end, "</p>");
        assert!(config.parsing.helpful_errors);
    }

    #[test]
    fn missing_files() {
        let missing = std::env::temp_dir().join("plugdoc-missing-config.toml");
        assert!(Loader::new().with_file(&missing).build().is_err());
        assert!(Loader::new().with_optional_file(&missing).build().is_ok());
    }

    #[test]
    fn options_for_plugin() {
        let config = load_defaults().expect("defaults to deserialize");
        let plugin = PluginIdentifier::module("a.b.c");
        let options = config.parsing.to_options_for(plugin.clone());
        assert_eq!(options.current_plugin, Some(plugin));
    }
}
