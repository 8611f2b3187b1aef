//! HTML format implementation
//!
//! Strategy: direct part → HTML string mapping (one-way only)
//!
//! # Styles
//!
//! | Part | `antsibull-docs` | `plain` |
//! |------|------------------|---------|
//! | Bold | `<b>` | `<b>` |
//! | Code | `<code class='docutils literal notranslate'>` | `<code>` |
//! | Module, Plugin | `<a ... class='module'>` or `<span class='module'>` | `<a>` or bare text |
//! | Option name / value / return value | `<code class="ansible-option ...">` | `<code>` |
//! | Env variable | `<code class="xref std std-envvar literal notranslate">` | `<code>` |
//!
//! The `antsibull-docs` style matches the markup Sphinx produces for the
//! same constructs, so the output can be mixed with Sphinx pages.
//!
//! Each paragraph is wrapped in `par_start` / `par_end` (default `<p>` and
//! `</p>`); paragraphs are concatenated without separator.

use crate::common::add_to_destination;
use crate::common::uri::encode_uri;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{FormatOverrides, FormatterSet, LinkProviders, TextFormatter};
use plugdoc_parser::markup::{Document, OptionLike, PluginIdentifier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlStyle {
    #[default]
    AntsibullDocs,
    Plain,
}

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub style: HtmlStyle,
    pub par_start: String,
    pub par_end: String,
    /// The plugin whose documentation is rendered.
    pub current_plugin: Option<PluginIdentifier>,
    pub links: LinkProviders,
    pub formatters: FormatOverrides,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            style: HtmlStyle::default(),
            par_start: "<p>".to_string(),
            par_end: "</p>".to_string(),
            current_plugin: None,
            links: LinkProviders::default(),
            formatters: FormatOverrides::default(),
        }
    }
}

/// Escapes `&`, `<` and `>`.
pub fn quote_html(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => quoted.push_str("&amp;"),
            '<' => quoted.push_str("&lt;"),
            '>' => quoted.push_str("&gt;"),
            _ => quoted.push(ch),
        }
    }
    quoted
}

/// Escapes text for use inside a quoted attribute value.
pub fn quote_html_arg(text: &str) -> String {
    quote_html(text)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn href(url: &str) -> String {
    quote_html_arg(&encode_uri(url))
}

fn option_like_class(option: &OptionLike, is_option: bool) -> (&'static str, bool) {
    match (is_option, option.value.is_some()) {
        (true, false) => ("ansible-option", true),
        (true, true) => ("ansible-option-value", false),
        (false, _) => ("ansible-return-value", false),
    }
}

fn antsibull_option_like(option: &OptionLike, url: Option<&str>, is_option: bool) -> String {
    let (class, strong) = option_like_class(option, is_option);
    let (link_start, link_end) = match url {
        Some(url) => (
            format!(
                "<a class=\"reference internal\" href=\"{}\"><span class=\"std std-ref\"><span class=\"pre\">",
                href(url)
            ),
            "</span></span></a>",
        ),
        None => (String::new(), ""),
    };
    let (strong_start, strong_end) = if strong { ("<strong>", "</strong>") } else { ("", "") };
    format!(
        "<code class=\"{class} literal notranslate\">{strong_start}{link_start}{}{link_end}{strong_end}</code>",
        quote_html(&option.display_text())
    )
}

fn plain_option_like(option: &OptionLike, url: Option<&str>, is_option: bool) -> String {
    let (_, strong) = option_like_class(option, is_option);
    let (link_start, link_end) = match url {
        Some(url) => (format!("<a href='{}'>", href(url)), "</a>"),
        None => (String::new(), ""),
    };
    let (strong_start, strong_end) = if strong { ("<strong>", "</strong>") } else { ("", "") };
    format!(
        "<code>{strong_start}{link_start}{}{link_end}{strong_end}</code>",
        quote_html(&option.display_text())
    )
}

fn format_error(message: &str) -> String {
    format!(
        "<span class=\"error\">ERROR while parsing: {}</span>",
        quote_html(message)
    )
}

fn format_link(text: &str, url: &str) -> String {
    format!("<a href='{}'>{}</a>", href(url), quote_html(text))
}

fn format_url(url: &str) -> String {
    format!("<a href='{}'>{}</a>", href(url), quote_html(&encode_uri(url)))
}

fn antsibull_reference(name: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("<a href='{}' class='module'>{}</a>", href(url), quote_html(name)),
        None => format!("<span class='module'>{}</span>", quote_html(name)),
    }
}

fn plain_reference(name: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("<a href='{}'>{}</a>", href(url), quote_html(name)),
        None => quote_html(name),
    }
}

fn tagged(open: &'static str, close: &'static str) -> TextFormatter {
    Arc::new(move |text: &str| format!("{open}{}{close}", quote_html(text)))
}

/// The default formatters of `style`.
pub fn default_formatters(style: HtmlStyle) -> FormatterSet {
    match style {
        HtmlStyle::AntsibullDocs => FormatterSet {
            error: Arc::new(format_error),
            bold: tagged("<b>", "</b>"),
            code: tagged("<code class='docutils literal notranslate'>", "</code>"),
            horizontal_line: Arc::new(|| "<hr/>".to_string()),
            italic: tagged("<em>", "</em>"),
            link: Arc::new(format_link),
            module: Arc::new(antsibull_reference),
            doc_ref: Arc::new(|text: &str, _: &str| {
                format!("<span class='module'>{}</span>", quote_html(text))
            }),
            url: Arc::new(format_url),
            text: Arc::new(quote_html),
            env_variable: tagged(
                "<code class=\"xref std std-envvar literal notranslate\">",
                "</code>",
            ),
            option_name: Arc::new(|option: &OptionLike, url: Option<&str>| {
                antsibull_option_like(option, url, true)
            }),
            option_value: tagged("<code class=\"ansible-value literal notranslate\">", "</code>"),
            plugin: Arc::new(|plugin: &PluginIdentifier, url: Option<&str>| {
                antsibull_reference(&plugin.fqcn, url)
            }),
            return_value: Arc::new(|option: &OptionLike, url: Option<&str>| {
                antsibull_option_like(option, url, false)
            }),
        },
        HtmlStyle::Plain => FormatterSet {
            error: Arc::new(format_error),
            bold: tagged("<b>", "</b>"),
            code: tagged("<code>", "</code>"),
            horizontal_line: Arc::new(|| "<hr/>".to_string()),
            italic: tagged("<em>", "</em>"),
            link: Arc::new(format_link),
            module: Arc::new(plain_reference),
            doc_ref: Arc::new(|text: &str, _: &str| quote_html(text)),
            url: Arc::new(format_url),
            text: Arc::new(quote_html),
            env_variable: tagged("<code>", "</code>"),
            option_name: Arc::new(|option: &OptionLike, url: Option<&str>| {
                plain_option_like(option, url, true)
            }),
            option_value: tagged("<code>", "</code>"),
            plugin: Arc::new(|plugin: &PluginIdentifier, url: Option<&str>| {
                plain_reference(&plugin.fqcn, url)
            }),
            return_value: Arc::new(|option: &OptionLike, url: Option<&str>| {
                plain_option_like(option, url, false)
            }),
        },
    }
}

/// Renders `document` as HTML.
pub fn to_html(document: &Document, options: &HtmlOptions) -> String {
    let formatters = options.formatters.merge(default_formatters(options.style));
    let mut result = Vec::new();
    for paragraph in document {
        result.push(options.par_start.clone());
        add_to_destination(
            &mut result,
            paragraph,
            &formatters,
            &options.links,
            options.current_plugin.as_ref(),
        );
        result.push(options.par_end.clone());
    }
    tracing::trace!(paragraphs = document.len(), style = ?options.style, "rendered html");
    result.concat()
}

/// HTML format with configurable options
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    pub options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML, styled like Sphinx output or plain"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_html(doc, &self.options))
    }
}
