//! Document model produced by the markup parser.
//!
//! A [`Document`] is a list of [`Paragraph`]s, each paragraph an ordered list of
//! [`Part`]s. Parts are plain values: the parser builds them once and renderers
//! only read them.
//!
//! Every part may carry the exact slice of input it was parsed from (see
//! [`ParsingOptions::add_source`](super::ParsingOptions::add_source)). When
//! present, concatenating the sources of a paragraph yields the paragraph text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered parts of one input string. Order is rendering order.
pub type Paragraph = Vec<Part>;

/// Ordered paragraphs, one per input string.
pub type Document = Vec<Paragraph>;

/// Identity of a plugin: its fully-qualified collection name and its type
/// (`module`, `role`, `lookup`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PluginIdentifier {
    pub fqcn: String,
    #[serde(rename = "type")]
    pub plugin_type: String,
}

impl PluginIdentifier {
    pub fn new(fqcn: impl Into<String>, plugin_type: impl Into<String>) -> Self {
        Self {
            fqcn: fqcn.into(),
            plugin_type: plugin_type.into(),
        }
    }

    /// Identity of a module, the implicit type of `M(...)` references.
    pub fn module(fqcn: impl Into<String>) -> Self {
        Self::new(fqcn, "module")
    }

    pub fn is_role(&self) -> bool {
        self.plugin_type == "role"
    }
}

impl fmt::Display for PluginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.fqcn, self.plugin_type)
    }
}

/// Reference to an option or a return value, as produced by `O(...)` and `RV(...)`.
///
/// `entrypoint` is always set when `plugin` is a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLike {
    pub plugin: Option<PluginIdentifier>,
    pub entrypoint: Option<String>,
    /// `name` with `[...]` subscripts removed, split on `.`. Never empty.
    pub link_path: Vec<String>,
    pub name: String,
    pub value: Option<String>,
}

impl OptionLike {
    /// The displayed text: `name` or `name=value`.
    pub fn display_text(&self) -> String {
        match &self.value {
            Some(value) => format!("{}={}", self.name, value),
            None => self.name.clone(),
        }
    }
}

/// The payload of a [`Part`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartKind {
    /// Literal text between commands.
    Text { text: String },
    /// `I(...)`
    Italic { text: String },
    /// `B(...)`
    Bold { text: String },
    /// `C(...)`
    Code { text: String },
    /// `M(...)`
    Module { fqcn: String },
    /// `P(fqcn#type)`
    Plugin { plugin: PluginIdentifier },
    /// `U(...)`
    Url { url: String },
    /// `L(text, url)`
    Link { text: String, url: String },
    /// `R(text, ref)`
    DocRef { text: String, reference: String },
    /// `E(...)`
    EnvVariable { name: String },
    /// `V(...)`
    OptionValue { value: String },
    /// `O(...)`
    OptionName(OptionLike),
    /// `RV(...)`
    ReturnValue(OptionLike),
    /// `HORIZONTALLINE`
    HorizontalLine,
    /// A recovered failure, only emitted under the `message` error policy.
    Error { message: String },
}

impl PartKind {
    /// Short lowercase name of the variant, used in logs and test output.
    pub fn name(&self) -> &'static str {
        match self {
            PartKind::Text { .. } => "text",
            PartKind::Italic { .. } => "italic",
            PartKind::Bold { .. } => "bold",
            PartKind::Code { .. } => "code",
            PartKind::Module { .. } => "module",
            PartKind::Plugin { .. } => "plugin",
            PartKind::Url { .. } => "url",
            PartKind::Link { .. } => "link",
            PartKind::DocRef { .. } => "doc_ref",
            PartKind::EnvVariable { .. } => "env_variable",
            PartKind::OptionValue { .. } => "option_value",
            PartKind::OptionName(_) => "option_name",
            PartKind::ReturnValue(_) => "return_value",
            PartKind::HorizontalLine => "horizontal_line",
            PartKind::Error { .. } => "error",
        }
    }
}

/// One markup unit of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(flatten)]
    pub kind: PartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Part {
    pub fn new(kind: PartKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(PartKind::Text { text: text.into() })
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(PartKind::Italic { text: text.into() })
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(PartKind::Bold { text: text.into() })
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(PartKind::Code { text: text.into() })
    }

    pub fn module(fqcn: impl Into<String>) -> Self {
        Self::new(PartKind::Module { fqcn: fqcn.into() })
    }

    pub fn plugin(plugin: PluginIdentifier) -> Self {
        Self::new(PartKind::Plugin { plugin })
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::new(PartKind::Url { url: url.into() })
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(PartKind::Link {
            text: text.into(),
            url: url.into(),
        })
    }

    pub fn doc_ref(text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::new(PartKind::DocRef {
            text: text.into(),
            reference: reference.into(),
        })
    }

    pub fn env_variable(name: impl Into<String>) -> Self {
        Self::new(PartKind::EnvVariable { name: name.into() })
    }

    pub fn option_value(value: impl Into<String>) -> Self {
        Self::new(PartKind::OptionValue {
            value: value.into(),
        })
    }

    pub fn option_name(option: OptionLike) -> Self {
        Self::new(PartKind::OptionName(option))
    }

    pub fn return_value(option: OptionLike) -> Self {
        Self::new(PartKind::ReturnValue(option))
    }

    pub fn horizontal_line() -> Self {
        Self::new(PartKind::HorizontalLine)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(PartKind::Error {
            message: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, PartKind::Error { .. })
    }
}

impl From<PartKind> for Part {
    fn from(kind: PartKind) -> Self {
        Part::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_like_display_text() {
        let mut option = OptionLike {
            plugin: None,
            entrypoint: None,
            link_path: vec!["foo".into()],
            name: "foo".into(),
            value: None,
        };
        assert_eq!(option.display_text(), "foo");
        option.value = Some("bar".into());
        assert_eq!(option.display_text(), "foo=bar");
    }

    #[test]
    fn serializes_with_type_tag() {
        let part = Part::bold("x").with_source("B(x)");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "bold");
        assert_eq!(json["text"], "x");
        assert_eq!(json["source"], "B(x)");

        let back: Part = serde_json::from_value(json).unwrap();
        assert_eq!(back, part);
    }

    #[test]
    fn source_is_omitted_when_absent() {
        let json = serde_json::to_value(Part::horizontal_line()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "horizontal_line" }));
    }

    #[test]
    fn plugin_identifier_uses_type_key() {
        let plugin = PluginIdentifier::new("foo.bar.baz", "lookup");
        let json = serde_json::to_value(&plugin).unwrap();
        assert_eq!(json, serde_json::json!({ "fqcn": "foo.bar.baz", "type": "lookup" }));
        assert_eq!(plugin.to_string(), "foo.bar.baz#lookup");
        assert!(PluginIdentifier::new("a.b.c", "role").is_role());
    }
}
