//! # plugdoc
//!
//! Parser and renderers for the inline markup of plugin documentation:
//! `B(bold)`, `M(namespace.collection.module)`, `O(option=value)` and friends.
//!
//! This crate only ties the workspace together:
//!
//! - [`parser`]: the markup parser and its document model
//! - [`babel`]: HTML, Markdown, RST and ansible-doc text renderers
//! - [`config`]: layered configuration with embedded defaults
//!
//! For a one-shot conversion with configured options, see [`render`].

pub use plugdoc_babel as babel;
pub use plugdoc_config as config;
pub use plugdoc_parser as parser;

pub use plugdoc_babel::{
    to_ansible_doc_text, to_html, to_md, to_rst, Format, FormatError, FormatRegistry,
};
pub use plugdoc_config::{load_defaults, Loader, PlugdocConfig};
pub use plugdoc_parser::markup::{
    parse, Document, ErrorPolicy, Part, PartKind, ParseError, ParsingOptions, PluginIdentifier,
    Whitespace,
};

use plugdoc_babel::formats::{HtmlFormat, RstFormat};

/// A registry with the built-in formats, HTML and RST set up from `config`.
pub fn registry(config: &PlugdocConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(HtmlFormat::new(config.html.to_options()));
    registry.register(RstFormat::new(config.rst.to_options()));
    registry
}

/// Parses `markup` and renders it as `format`, both configured by `config`.
pub fn render(markup: &str, format: &str, config: &PlugdocConfig) -> Result<String, FormatError> {
    registry(config).render(markup, format, &config.parsing.to_options())
}
