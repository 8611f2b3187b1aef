//! Format registry
//!
//! Maps format names to [`Format`] implementations so callers (and the config
//! layer) can pick an output by name.

use crate::error::FormatError;
use crate::format::Format;
use plugdoc_parser::markup::{parse, Document, ParsingOptions};
use std::collections::HashMap;

/// Registry of output formats, keyed by [`Format::name`].
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let html = registry.render("B(bold)", "html", &ParsingOptions::default())?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format of the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// All registered format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Read a document back from `source` written in `format`.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format
            )));
        }
        fmt.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support serialization",
                format
            )));
        }
        fmt.serialize(doc)
    }

    /// Parse markup and render it in one go.
    pub fn render(
        &self,
        markup: &str,
        format: &str,
        options: &ParsingOptions,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        let doc = parse(markup, options)?;
        tracing::trace!(format, paragraphs = doc.len(), "rendering markup");
        self.serialize(&doc, fmt.name())
    }

    /// A registry with the built-in formats, all with default options
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::html::HtmlFormat::default());
        registry.register(crate::formats::markdown::MarkdownFormat::default());
        registry.register(crate::formats::rst::RstFormat::default());
        registry.register(crate::formats::ansible_doc_text::AnsibleDocTextFormat::default());
        registry.register(crate::formats::json::JsonFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugdoc_parser::markup::{ErrorPolicy, Part};

    struct CountingFormat;

    impl Format for CountingFormat {
        fn name(&self) -> &str {
            "count"
        }
        fn supports_serialization(&self) -> bool {
            true
        }
        fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
            Ok(doc.iter().map(Vec::len).sum::<usize>().to_string())
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
        registry.register(CountingFormat);
        registry.register(CountingFormat);

        assert!(registry.has("count"));
        assert_eq!(registry.list_formats(), vec!["count"]);
        assert_eq!(registry.get("count").unwrap().name(), "count");
    }

    #[test]
    fn test_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(FormatError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_parse_not_supported() {
        let mut registry = FormatRegistry::new();
        registry.register(CountingFormat);
        let error = registry.parse("3", "count").unwrap_err();
        assert_eq!(error.to_string(), "Format 'count' does not support parsing");
    }

    #[test]
    fn test_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(CountingFormat);
        let doc = vec![vec![Part::text("a"), Part::bold("b")], vec![]];
        assert_eq!(registry.serialize(&doc, "count").unwrap(), "2");
    }

    #[test]
    fn test_render() {
        let mut registry = FormatRegistry::new();
        registry.register(CountingFormat);
        let options = ParsingOptions::default();
        assert_eq!(registry.render("a B(b) c", "count", &options).unwrap(), "3");

        let strict = options.with_errors(ErrorPolicy::Exception);
        let error = registry.render("M(foo)", "count", &strict).unwrap_err();
        assert!(matches!(error, FormatError::Markup(_)));
        assert!(matches!(
            registry.render("x", "nonexistent", &ParsingOptions::default()),
            Err(FormatError::FormatNotFound(_))
        ));
    }

    #[test]
    fn test_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["ansible-doc-text", "html", "json", "markdown", "rst"]
        );
    }
}
