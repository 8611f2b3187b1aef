//! reStructuredText format implementation
//!
//! Inline roles need to be separated from surrounding text, so every
//! formatter wraps its role in `\ ` (an escaped space, which RST drops). Most
//! of those escapes are redundant in the final text; [`remove_backslash_space`]
//! removes them line by line once a paragraph is rendered.
//!
//! # Styles
//!
//! - `antsibull-docs`: references use the `:ref:`, `:ansopt:`, `:ansretval:`
//!   and `:ansval:` roles that the Ansible Sphinx extension provides.
//! - `plain`: only standard docutils roles; references become links when a
//!   link provider knows a URL and literals otherwise.

use crate::common::add_to_destination;
use crate::common::text::split_lines;
use crate::common::uri::encode_uri;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{FormatOverrides, FormatterSet, LinkProviders, TextFormatter};
use plugdoc_parser::markup::{Document, OptionLike, PluginIdentifier};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RstStyle {
    #[default]
    AntsibullDocs,
    Plain,
}

#[derive(Debug, Clone, Default)]
pub struct RstOptions {
    pub style: RstStyle,
    pub current_plugin: Option<PluginIdentifier>,
    pub links: LinkProviders,
    pub formatters: FormatOverrides,
}

/// Backslash-escapes RST inline markup characters.
///
/// Leading and trailing spaces are protected with `\ ` on request, which is
/// needed inside roles. `must_not_be_empty` turns an empty result into `\ `.
pub fn quote_rst(
    text: &str,
    escape_starting_whitespace: bool,
    escape_ending_whitespace: bool,
    must_not_be_empty: bool,
) -> String {
    let mut quoted = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '<' | '>' | '_' | '*' | '`') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    if escape_ending_whitespace && quoted.ends_with(' ') {
        quoted.push_str("\\ ");
    }
    if escape_starting_whitespace && quoted.starts_with(' ') {
        quoted.insert_str(0, "\\ ");
    }
    if must_not_be_empty && quoted.is_empty() {
        quoted.push_str("\\ ");
    }
    quoted
}

fn quote(text: &str) -> String {
    quote_rst(text, false, false, false)
}

fn quote_role_content(text: &str) -> String {
    quote_rst(text, true, true, true)
}

fn role(name: &'static str) -> TextFormatter {
    Arc::new(move |text: &str| format!("\\ :{name}:`{}`\\ ", quote_role_content(text)))
}

fn format_error(message: &str) -> String {
    format!(
        "\\ :strong:`ERROR while parsing`\\ : {}\\ ",
        quote(message)
    )
}

fn format_link(text: &str, url: &str) -> String {
    format!("\\ `{} <{}>`__\\ ", quote(text), encode_uri(url))
}

fn format_url(url: &str) -> String {
    format!("\\ {}\\ ", encode_uri(url))
}

/// `fqcn#type:[entrypoint:]name[=value]`, or just `name[=value]`.
fn option_like_target(option: &OptionLike) -> String {
    let text = option.display_text();
    match &option.plugin {
        Some(plugin) => match &option.entrypoint {
            Some(entrypoint) if plugin.is_role() => format!("{plugin}:{entrypoint}:{text}"),
            _ => format!("{plugin}:{text}"),
        },
        None => text,
    }
}

fn plain_reference(name: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format_link(name, url),
        None => quote(name),
    }
}

fn plain_option_like(option: &OptionLike, url: Option<&str>) -> String {
    let text = option.display_text();
    match url {
        Some(url) => format_link(&text, url),
        None => format!("\\ :literal:`{}`\\ ", quote_role_content(&text)),
    }
}

/// The default formatters of `style`.
pub fn default_formatters(style: RstStyle) -> FormatterSet {
    let common = FormatterSet {
        error: Arc::new(format_error),
        bold: role("strong"),
        code: role("literal"),
        horizontal_line: Arc::new(|| "\n\n------------\n\n".to_string()),
        italic: role("emphasis"),
        link: Arc::new(format_link),
        module: Arc::new(|fqcn: &str, _: Option<&str>| {
            format!(
                "\\ :ref:`{} <ansible_collections.{fqcn}_module>`\\ ",
                quote(fqcn)
            )
        }),
        doc_ref: Arc::new(|text: &str, reference: &str| {
            format!("\\ :ref:`{} <{reference}>`\\ ", quote(text))
        }),
        url: Arc::new(format_url),
        text: Arc::new(quote),
        env_variable: role("envvar"),
        option_name: Arc::new(|option: &OptionLike, _: Option<&str>| {
            format!(
                "\\ :ansopt:`{}`\\ ",
                quote_role_content(&option_like_target(option))
            )
        }),
        option_value: role("ansval"),
        plugin: Arc::new(|plugin: &PluginIdentifier, _: Option<&str>| {
            format!(
                "\\ :ref:`{} <ansible_collections.{}_{}>`\\ ",
                quote(&plugin.fqcn),
                plugin.fqcn,
                plugin.plugin_type
            )
        }),
        return_value: Arc::new(|option: &OptionLike, _: Option<&str>| {
            format!(
                "\\ :ansretval:`{}`\\ ",
                quote_role_content(&option_like_target(option))
            )
        }),
    };
    match style {
        RstStyle::AntsibullDocs => common,
        RstStyle::Plain => FormatterSet {
            module: Arc::new(plain_reference),
            doc_ref: Arc::new(|text: &str, _: &str| quote(text)),
            env_variable: role("literal"),
            option_name: Arc::new(plain_option_like),
            option_value: role("literal"),
            plugin: Arc::new(|plugin: &PluginIdentifier, url: Option<&str>| {
                plain_reference(&plugin.fqcn, url)
            }),
            return_value: Arc::new(plain_option_like),
            ..common
        },
    }
}

fn backslashes_before(chars: &[char], start: usize, position: usize) -> usize {
    chars[start..position]
        .iter()
        .rev()
        .take_while(|&&ch| ch == '\\')
        .count()
}

/// Drops `\ ` escapes that have no effect in `line`.
///
/// At both ends of the line escapes and spaces are trimmed. Inside the line an
/// escaped space is dropped when it follows or precedes whitespace, except
/// within backquoted role content.
pub fn remove_backslash_space(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut start = 0;
    let mut end = chars.len();

    loop {
        if end - start >= 2 && chars[start] == '\\' && chars[start + 1] == ' ' {
            start += 2;
        } else if start < end && chars[start] == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    while start < end {
        match chars[end - 1] {
            ' ' if backslashes_before(&chars, start, end - 1) % 2 == 1 => end -= 2,
            ' ' => end -= 1,
            '\\' if backslashes_before(&chars, start, end) % 2 == 1 => end -= 1,
            _ => break,
        }
    }

    let mut result = String::with_capacity(end - start);
    let mut in_role_content = false;
    let mut index = start;
    while index < end {
        let ch = chars[index];
        if ch == '\\' && index + 1 < end {
            let next = chars[index + 1];
            if next == ' ' && !in_role_content {
                let after_whitespace = result.chars().last().map_or(true, char::is_whitespace);
                let before_whitespace = index + 2 >= end || chars[index + 2].is_whitespace();
                if after_whitespace || before_whitespace {
                    index += 2;
                    continue;
                }
            }
            result.push(ch);
            result.push(next);
            index += 2;
            continue;
        }
        if ch == '`' {
            in_role_content = !in_role_content;
        }
        result.push(ch);
        index += 1;
    }
    result
}

fn postprocess(paragraph: &str) -> String {
    let lines: Vec<String> = split_lines(paragraph)
        .into_iter()
        .map(remove_backslash_space)
        .collect();
    lines.join("\n").trim_matches('\n').to_string()
}

/// Renders `document` as reStructuredText.
pub fn to_rst(document: &Document, options: &RstOptions) -> String {
    let formatters = options.formatters.merge(default_formatters(options.style));
    let paragraphs: Vec<String> = document
        .iter()
        .map(|paragraph| {
            let mut parts = Vec::new();
            add_to_destination(
                &mut parts,
                paragraph,
                &formatters,
                &options.links,
                options.current_plugin.as_ref(),
            );
            let text = postprocess(&parts.concat());
            if text.is_empty() {
                "\\ ".to_string()
            } else {
                text
            }
        })
        .collect();
    tracing::trace!(paragraphs = paragraphs.len(), style = ?options.style, "rendered rst");
    paragraphs.join("\n\n")
}

#[derive(Debug, Clone, Default)]
pub struct RstFormat {
    pub options: RstOptions,
}

impl RstFormat {
    pub fn new(options: RstOptions) -> Self {
        Self { options }
    }
}

impl Format for RstFormat {
    fn name(&self) -> &str {
        "rst"
    }

    fn description(&self) -> &str {
        "reStructuredText for Sphinx or plain docutils"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_rst(doc, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugdoc_parser::markup::{parse, Part, ParsingOptions};
    use rstest::rstest;

    fn render(markup: &str, options: &RstOptions) -> String {
        to_rst(&parse(markup, &ParsingOptions::default()).unwrap(), options)
    }

    #[rstest]
    #[case("", false, false, false, "")]
    #[case("", false, false, true, "\\ ")]
    #[case("foo", false, false, false, "foo")]
    #[case("  foo  ", false, false, false, "  foo  ")]
    #[case("  foo  ", true, false, false, "\\   foo  ")]
    #[case("  foo  ", false, true, false, "  foo  \\ ")]
    #[case("  foo  ", true, true, false, "\\   foo  \\ ")]
    #[case("\\<_>`*<_>*`\\", false, false, false, "\\\\\\<\\_\\>\\`\\*\\<\\_\\>\\*\\`\\\\")]
    fn test_quote_rst(
        #[case] text: &str,
        #[case] starting: bool,
        #[case] ending: bool,
        #[case] not_empty: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(quote_rst(text, starting, ending, not_empty), expected);
    }

    #[rstest]
    #[case("", "")]
    #[case("\\ \\  foo", "foo")]
    #[case("foo \\ \\ ", "foo")]
    #[case("foo\\\\ ", "foo\\\\")]
    #[case("foo\\", "foo")]
    #[case("a \\ :strong:`b`\\  c", "a :strong:`b` c")]
    #[case(":strong:`ERROR`\\ : x", ":strong:`ERROR`\\ : x")]
    #[case(":strong:`\\  x \\ `", ":strong:`\\  x \\ `")]
    #[case("a\\_b", "a\\_b")]
    fn test_remove_backslash_space(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(remove_backslash_space(line), expected);
    }

    #[test]
    fn test_paragraphs() {
        let options = RstOptions::default();
        assert_eq!(to_rst(&vec![], &options), "");
        assert_eq!(to_rst(&vec![vec![]], &options), "\\ ");
        let doc = vec![vec![Part::text("a")], vec![Part::text(" ")], vec![Part::text("b")]];
        assert_eq!(to_rst(&doc, &options), "a\n\n\\ \n\nb");
    }

    #[test]
    fn test_antsibull_docs_style() {
        let options = RstOptions::default();
        assert_eq!(
            render("B(b) C(c) I(i) a_b *c*", &options),
            ":strong:`b` :literal:`c` :emphasis:`i` a\\_b \\*c\\*"
        );
        assert_eq!(
            render("L(a b, https://x.org) U(https://y.org/a b) R(t, ref)", &options),
            "`a b <https://x.org>`__ https://y.org/a%20b :ref:`t <ref>`"
        );
        assert_eq!(
            render("M(a.b.c) P(a.b.d#lookup) E(HOME) V(x)", &options),
            ":ref:`a.b.c <ansible_collections.a.b.c_module>` \
             :ref:`a.b.d <ansible_collections.a.b.d_lookup>` :envvar:`HOME` :ansval:`x`"
        );
        assert_eq!(
            render("O(a.b.c#module:foo=bar) O(a.b.r#role:main:x) RV(baz)", &options),
            ":ansopt:`a.b.c#module:foo=bar` :ansopt:`a.b.r#role:main:x` :ansretval:`baz`"
        );
    }

    #[test]
    fn test_horizontal_line() {
        assert_eq!(
            render("a HORIZONTALLINE b", &RstOptions::default()),
            "a\n\n------------\n\nb"
        );
    }

    #[test]
    fn test_error() {
        assert_eq!(
            render("M(x)", &RstOptions::default()),
            ":strong:`ERROR while parsing`\\ : While parsing \"M(x)\" at index 1: \
             Module name \"x\" is not a FQCN"
        );
    }

    #[test]
    fn test_plain_style() {
        let options = RstOptions {
            style: RstStyle::Plain,
            links: LinkProviders::default()
                .with_plugin_link(|plugin| {
                    (plugin.plugin_type == "module").then(|| format!("https://x/{}.html", plugin.fqcn))
                })
                .with_plugin_option_like_link(|_, _, _, path, _| Some(format!("#{}", path.join("-")))),
            ..RstOptions::default()
        };
        assert_eq!(
            render("M(a.b.c) P(a.b.d#lookup) O(a.b.c#module:foo) O(bar) E(HOME) R(t, ref)", &options),
            "`a.b.c <https://x/a.b.c.html>`__ a.b.d `foo <#foo>`__ :literal:`bar` \
             :literal:`HOME` t"
        );
    }
}
