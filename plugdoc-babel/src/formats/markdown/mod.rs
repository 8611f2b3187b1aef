//! Markdown format implementation
//!
//! Renders CommonMark with a few inline HTML tags (`<b>`, `<em>`, `<code>`,
//! `<hr>`) where Markdown syntax would need context the renderer does not
//! have. All text is backslash-escaped, so no input can introduce Markdown
//! structure of its own.
//!
//! Paragraphs are separated by a blank line. An empty paragraph renders as a
//! single space so that it still takes up a slot.

use crate::common::add_to_destination;
use crate::common::uri::encode_uri;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{FormatOverrides, FormatterSet, LinkProviders, TextFormatter};
use plugdoc_parser::markup::{Document, OptionLike, PluginIdentifier};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    pub current_plugin: Option<PluginIdentifier>,
    pub links: LinkProviders,
    pub formatters: FormatOverrides,
}

const ESCAPED: &str = "!\"#$%&'()*+,:;<=>?@[\\]^_`{|}~-";

/// Backslash-escapes CommonMark punctuation. `.` and `/` are left alone.
pub fn quote_md(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for ch in text.chars() {
        if ESCAPED.contains(ch) {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted
}

fn reference(name: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("[{}]({})", quote_md(name), quote_md(&encode_uri(url))),
        None => quote_md(name),
    }
}

fn option_like(option: &OptionLike, url: Option<&str>, is_option: bool) -> String {
    let (class, strong) = match (is_option, option.value.is_some()) {
        (true, false) => ("ansible-option", true),
        (true, true) => ("ansible-option-value", false),
        (false, _) => ("ansible-return-value", false),
    };
    let mut result = format!("<code class=\"{class}\">");
    if strong {
        result.push_str("<strong>");
    }
    if let Some(url) = url {
        result.push_str(&format!("<a href=\"{}\">", quote_md(&encode_uri(url))));
    }
    result.push_str(&quote_md(&option.display_text()));
    if url.is_some() {
        result.push_str("</a>");
    }
    if strong {
        result.push_str("</strong>");
    }
    result.push_str("</code>");
    result
}

fn tagged(open: &'static str, close: &'static str) -> TextFormatter {
    Arc::new(move |text: &str| format!("{open}{}{close}", quote_md(text)))
}

pub fn default_formatters() -> FormatterSet {
    FormatterSet {
        error: Arc::new(|message: &str| {
            format!("<b>ERROR while parsing</b>: {}", quote_md(message))
        }),
        bold: tagged("<b>", "</b>"),
        code: tagged("<code>", "</code>"),
        horizontal_line: Arc::new(|| "<hr>".to_string()),
        italic: tagged("<em>", "</em>"),
        link: Arc::new(|text: &str, url: &str| {
            format!("[{}]({})", quote_md(text), quote_md(&encode_uri(url)))
        }),
        module: Arc::new(reference),
        doc_ref: Arc::new(|text: &str, _: &str| quote_md(text)),
        url: Arc::new(|url: &str| {
            let encoded = quote_md(&encode_uri(url));
            format!("[{encoded}]({encoded})")
        }),
        text: Arc::new(quote_md),
        env_variable: tagged("<code>", "</code>"),
        option_name: Arc::new(|option: &OptionLike, url: Option<&str>| {
            option_like(option, url, true)
        }),
        option_value: tagged("<code>", "</code>"),
        plugin: Arc::new(|plugin: &PluginIdentifier, url: Option<&str>| {
            reference(&plugin.fqcn, url)
        }),
        return_value: Arc::new(|option: &OptionLike, url: Option<&str>| {
            option_like(option, url, false)
        }),
    }
}

/// Renders `document` as Markdown.
pub fn to_md(document: &Document, options: &MarkdownOptions) -> String {
    let formatters = options.formatters.merge(default_formatters());
    let paragraphs: Vec<String> = document
        .iter()
        .map(|paragraph| {
            let mut line = Vec::new();
            add_to_destination(
                &mut line,
                paragraph,
                &formatters,
                &options.links,
                options.current_plugin.as_ref(),
            );
            let text = line.concat();
            if text.is_empty() {
                " ".to_string()
            } else {
                text
            }
        })
        .collect();
    tracing::trace!(paragraphs = paragraphs.len(), "rendered markdown");
    paragraphs.join("\n\n")
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    pub options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark with inline HTML"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_md(doc, &self.options))
    }
}
