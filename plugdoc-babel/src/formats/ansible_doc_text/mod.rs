//! ansible-doc text format implementation
//!
//! Plain terminal output in the conventions of `ansible-doc`: `*bold*`,
//! `` `code' ``, `[fqcn]` for plugin references. Nothing is escaped.

use crate::common::add_to_destination;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{FormatOverrides, FormatterSet, LinkProviders};
use plugdoc_parser::markup::{Document, OptionLike, PluginIdentifier};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct AnsibleDocTextOptions {
    /// Option references into this plugin are rendered without the
    /// `(of ...)` suffix.
    pub current_plugin: Option<PluginIdentifier>,
    pub links: LinkProviders,
    pub formatters: FormatOverrides,
}

fn quoted(text: &str) -> String {
    format!("`{text}'")
}

fn option_like(option: &OptionLike, current_plugin: Option<&PluginIdentifier>) -> String {
    let text = quoted(&option.display_text());
    let Some(plugin) = option.plugin.as_ref().filter(|&plugin| Some(plugin) != current_plugin)
    else {
        return text;
    };
    let suffix = match plugin.plugin_type.as_str() {
        "role" | "module" | "playbook" => "",
        _ => " plugin",
    };
    let mut owner = format!("{}{suffix} {}", plugin.plugin_type, plugin.fqcn);
    if let (true, Some(entrypoint)) = (plugin.is_role(), &option.entrypoint) {
        owner.push_str(&format!(", {entrypoint} entrypoint"));
    }
    format!("{text} (of {owner})")
}

/// The default formatters. Option references depend on `current_plugin`.
pub fn default_formatters(current_plugin: Option<PluginIdentifier>) -> FormatterSet {
    let option_like_formatter = Arc::new(move |option: &OptionLike, _: Option<&str>| {
        option_like(option, current_plugin.as_ref())
    });
    FormatterSet {
        error: Arc::new(|message: &str| format!("[[ERROR while parsing: {message}]]")),
        bold: Arc::new(|text: &str| format!("*{text}*")),
        code: Arc::new(quoted),
        horizontal_line: Arc::new(|| "\n-------------\n".to_string()),
        italic: Arc::new(quoted),
        link: Arc::new(|text: &str, url: &str| format!("{text} <{url}>")),
        module: Arc::new(|fqcn: &str, _: Option<&str>| format!("[{fqcn}]")),
        doc_ref: Arc::new(|text: &str, _: &str| text.to_string()),
        url: Arc::new(str::to_string),
        text: Arc::new(str::to_string),
        env_variable: Arc::new(quoted),
        option_name: option_like_formatter.clone(),
        option_value: Arc::new(quoted),
        plugin: Arc::new(|plugin: &PluginIdentifier, _: Option<&str>| format!("[{}]", plugin.fqcn)),
        return_value: option_like_formatter,
    }
}

/// Renders `document` as ansible-doc text.
pub fn to_ansible_doc_text(document: &Document, options: &AnsibleDocTextOptions) -> String {
    let formatters = options
        .formatters
        .merge(default_formatters(options.current_plugin.clone()));
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
            line.concat()
        })
        .collect();
    tracing::trace!(paragraphs = paragraphs.len(), "rendered ansible-doc text");
    paragraphs.join("\n\n")
}

#[derive(Debug, Clone, Default)]
pub struct AnsibleDocTextFormat {
    pub options: AnsibleDocTextOptions,
}

impl AnsibleDocTextFormat {
    pub fn new(options: AnsibleDocTextOptions) -> Self {
        Self { options }
    }
}

impl Format for AnsibleDocTextFormat {
    fn name(&self) -> &str {
        "ansible-doc-text"
    }

    fn description(&self) -> &str {
        "Plain text as shown by ansible-doc"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_ansible_doc_text(doc, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugdoc_parser::markup::{parse, Part, ParsingOptions};

    fn render(markup: &str, parsing: &ParsingOptions, options: &AnsibleDocTextOptions) -> String {
        to_ansible_doc_text(&parse(markup, parsing).unwrap(), options)
    }

    #[test]
    fn test_paragraphs() {
        let options = AnsibleDocTextOptions::default();
        assert_eq!(to_ansible_doc_text(&vec![], &options), "");
        assert_eq!(
            to_ansible_doc_text(&vec![vec![Part::text("test")]], &options),
            "test"
        );
        assert_eq!(
            to_ansible_doc_text(&vec![vec![Part::text("a")], vec![]], &options),
            "a\n\n"
        );
    }

    #[test]
    fn test_classic_markup() {
        assert_eq!(
            render(
                "B(b) I(i) C(c) HORIZONTALLINE L(t, http://x) U(http://y) M(a.b.c) R(t, r) <&>",
                &ParsingOptions::default(),
                &AnsibleDocTextOptions::default(),
            ),
            "*b* `i' `c' \n-------------\n t <http://x> http://y [a.b.c] t <&>"
        );
    }

    #[test]
    fn test_option_like_suffix() {
        let current = PluginIdentifier::new("a.b.c", "lookup");
        let parsing = ParsingOptions::default().with_current_plugin(current.clone());
        let options = AnsibleDocTextOptions {
            current_plugin: Some(current),
            ..AnsibleDocTextOptions::default()
        };
        assert_eq!(
            render(
                "O(x) O(y=1) RV(a.b.d#module:z) O(a.b.e#filter:w) O(a.b.r#role:main:v) O(ignore:u)",
                &parsing,
                &options,
            ),
            "`x' `y=1' `z' (of module a.b.d) `w' (of filter plugin a.b.e) \
             `v' (of role a.b.r, main entrypoint) `u'"
        );
    }

    #[test]
    fn test_semantic_markup() {
        assert_eq!(
            render(
                "E(HOME) V(a b) P(a.b.c#lookup) M(foo)",
                &ParsingOptions::default(),
                &AnsibleDocTextOptions::default(),
            ),
            "`HOME' `a b' [a.b.c] [[ERROR while parsing: While parsing \"M(foo)\" at index 32: \
             Module name \"foo\" is not a FQCN]]"
        );
    }
}
