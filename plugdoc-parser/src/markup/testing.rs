//! Fluent assertions for parsed paragraphs
//!
//!     Tests should not walk the part enum by hand: a change to a variant's
//!     fields then breaks every test that touches it. Assert through this API
//!     instead, so such a change is absorbed here.
//!
//!     ```rust,ignore
//!     use plugdoc_parser::markup::testing::assert_paragraph;
//!
//!     let document = parse("See O(foo.bar.baz#module:state=present).", &options)?;
//!     assert_paragraph(&document[0])
//!         .part_count(3)
//!         .part(0, |part| part.text("See "))
//!         .part(1, |part| {
//!             part.option_name(|option| {
//!                 option
//!                     .plugin("foo.bar.baz", "module")
//!                     .name("state")
//!                     .value(Some("present"))
//!             })
//!         })
//!         .part(2, |part| part.text("."));
//!     ```

use super::ast::{OptionLike, Paragraph, Part, PartKind, PluginIdentifier};

/// Text matching strategies for assertions
#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    Contains(String),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::Contains(substring) => actual.contains(substring),
        }
    }

    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{}: Expected text {:?}, but got '{}'",
            context,
            self,
            actual
        );
    }
}

/// Create an assertion builder for a paragraph
pub fn assert_paragraph(paragraph: &Paragraph) -> ParagraphAssertion<'_> {
    ParagraphAssertion {
        parts: paragraph,
        context: "paragraph".to_string(),
    }
}

fn summarize(parts: &[Part]) -> String {
    parts
        .iter()
        .map(|part| part.kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct ParagraphAssertion<'a> {
    parts: &'a [Part],
    context: String,
}

impl<'a> ParagraphAssertion<'a> {
    pub fn part_count(self, expected: usize) -> Self {
        assert_eq!(
            self.parts.len(),
            expected,
            "{}: Expected {} parts, found [{}]",
            self.context,
            expected,
            summarize(self.parts)
        );
        self
    }

    pub fn part<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(PartAssertion<'a>) -> R,
    {
        assert!(
            index < self.parts.len(),
            "{}: Part index {} out of bounds, parts are [{}]",
            self.context,
            index,
            summarize(self.parts)
        );
        assertion(PartAssertion {
            part: &self.parts[index],
            context: format!("{}.parts[{}]", self.context, index),
        });
        self
    }

    /// The concatenated sources of all parts.
    pub fn sources_concatenate_to(self, expected: &str) -> Self {
        let joined: String = self
            .parts
            .iter()
            .map(|part| {
                part.source
                    .as_deref()
                    .unwrap_or_else(|| panic!("{}: part without source", self.context))
            })
            .collect();
        assert_eq!(joined, expected, "{}: sources do not rebuild the input", self.context);
        self
    }

    pub fn no_errors(self) -> Self {
        assert!(
            !self.parts.iter().any(Part::is_error),
            "{}: Expected no error parts, found [{}]",
            self.context,
            summarize(self.parts)
        );
        self
    }
}

pub struct PartAssertion<'a> {
    part: &'a Part,
    context: String,
}

impl<'a> PartAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {} part, found {:?}",
            self.context, expected, self.part.kind
        )
    }

    fn field(&self, name: &str, actual: &str, expected: &str) {
        TextMatch::Exact(expected.to_string()).assert(actual, &format!("{}.{}", self.context, name));
    }

    pub fn text(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Text { text } => self.field("text", text, expected),
            _ => self.mismatch("text"),
        }
        self
    }

    pub fn italic(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Italic { text } => self.field("text", text, expected),
            _ => self.mismatch("italic"),
        }
        self
    }

    pub fn bold(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Bold { text } => self.field("text", text, expected),
            _ => self.mismatch("bold"),
        }
        self
    }

    pub fn code(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Code { text } => self.field("text", text, expected),
            _ => self.mismatch("code"),
        }
        self
    }

    pub fn module(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Module { fqcn } => self.field("fqcn", fqcn, expected),
            _ => self.mismatch("module"),
        }
        self
    }

    pub fn plugin(self, fqcn: &str, plugin_type: &str) -> Self {
        match &self.part.kind {
            PartKind::Plugin { plugin } => {
                self.field("fqcn", &plugin.fqcn, fqcn);
                self.field("type", &plugin.plugin_type, plugin_type);
            }
            _ => self.mismatch("plugin"),
        }
        self
    }

    pub fn url(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Url { url } => self.field("url", url, expected),
            _ => self.mismatch("url"),
        }
        self
    }

    pub fn link(self, text: &str, url: &str) -> Self {
        match &self.part.kind {
            PartKind::Link { text: actual, url: actual_url } => {
                self.field("text", actual, text);
                self.field("url", actual_url, url);
            }
            _ => self.mismatch("link"),
        }
        self
    }

    pub fn doc_ref(self, text: &str, reference: &str) -> Self {
        match &self.part.kind {
            PartKind::DocRef {
                text: actual,
                reference: actual_reference,
            } => {
                self.field("text", actual, text);
                self.field("ref", actual_reference, reference);
            }
            _ => self.mismatch("doc_ref"),
        }
        self
    }

    pub fn env_variable(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::EnvVariable { name } => self.field("name", name, expected),
            _ => self.mismatch("env_variable"),
        }
        self
    }

    pub fn option_value(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::OptionValue { value } => self.field("value", value, expected),
            _ => self.mismatch("option_value"),
        }
        self
    }

    pub fn option_name<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(OptionLikeAssertion<'a>) -> R,
    {
        match &self.part.kind {
            PartKind::OptionName(option) => {
                assertion(OptionLikeAssertion {
                    option,
                    context: format!("{}.option", self.context),
                });
            }
            _ => self.mismatch("option_name"),
        }
        self
    }

    pub fn return_value<F, R>(self, assertion: F) -> Self
    where
        F: FnOnce(OptionLikeAssertion<'a>) -> R,
    {
        match &self.part.kind {
            PartKind::ReturnValue(option) => {
                assertion(OptionLikeAssertion {
                    option,
                    context: format!("{}.return_value", self.context),
                });
            }
            _ => self.mismatch("return_value"),
        }
        self
    }

    pub fn horizontal_line(self) -> Self {
        if self.part.kind != PartKind::HorizontalLine {
            self.mismatch("horizontal_line");
        }
        self
    }

    pub fn error(self, expected: &str) -> Self {
        match &self.part.kind {
            PartKind::Error { message } => self.field("message", message, expected),
            _ => self.mismatch("error"),
        }
        self
    }

    pub fn error_contains(self, substring: &str) -> Self {
        match &self.part.kind {
            PartKind::Error { message } => {
                TextMatch::Contains(substring.to_string()).assert(message, &self.context)
            }
            _ => self.mismatch("error"),
        }
        self
    }

    pub fn source(self, expected: &str) -> Self {
        assert_eq!(
            self.part.source.as_deref(),
            Some(expected),
            "{}: unexpected source",
            self.context
        );
        self
    }
}

pub struct OptionLikeAssertion<'a> {
    option: &'a OptionLike,
    context: String,
}

impl OptionLikeAssertion<'_> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.option.name, expected, "{}: name", self.context);
        self
    }

    pub fn value(self, expected: Option<&str>) -> Self {
        assert_eq!(self.option.value.as_deref(), expected, "{}: value", self.context);
        self
    }

    pub fn plugin(self, fqcn: &str, plugin_type: &str) -> Self {
        assert_eq!(
            self.option.plugin,
            Some(PluginIdentifier::new(fqcn, plugin_type)),
            "{}: plugin",
            self.context
        );
        self
    }

    pub fn no_plugin(self) -> Self {
        assert_eq!(self.option.plugin, None, "{}: plugin", self.context);
        self
    }

    pub fn entrypoint(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.option.entrypoint.as_deref(),
            expected,
            "{}: entrypoint",
            self.context
        );
        self
    }

    pub fn link_path(self, expected: &[&str]) -> Self {
        assert_eq!(self.option.link_path, expected, "{}: link path", self.context);
        self
    }
}
