//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! Every format renders a parsed [`Document`]; formats that can also read documents back
//! (only `json` at the moment) override [`Format::parse`].

use crate::error::FormatError;
use plugdoc_parser::markup::Document;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct Shouting;
///
/// impl Format for Shouting {
///     fn name(&self) -> &str {
///         "shouting"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(to_ansible_doc_text(doc, &AnsibleDocTextOptions::default()).to_uppercase())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html", "rst")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Whether this format can be read back into a Document
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format can render a Document
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Read a Document from text in this format
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Render a Document
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
