//! Part dispatch
//!
//! Turns each part of a paragraph into a string with the matching formatter,
//! asking the link providers for URLs where a part can be linked.

use crate::options::{FormatterSet, LinkProviders, OptionLikeKind};
use plugdoc_parser::markup::{OptionLike, Part, PartKind, PluginIdentifier};

/// Appends one formatted string per part of `paragraph` to `destination`.
///
/// `M(...)` parts ask for a plugin link of type `module`. Option and return
/// value links are only requested for references that name a plugin.
pub fn add_to_destination(
    destination: &mut Vec<String>,
    paragraph: &[Part],
    formatters: &FormatterSet,
    links: &LinkProviders,
    current_plugin: Option<&PluginIdentifier>,
) {
    for part in paragraph {
        let formatted = match &part.kind {
            PartKind::Error { message } => (formatters.error)(message),
            PartKind::Bold { text } => (formatters.bold)(text),
            PartKind::Code { text } => (formatters.code)(text),
            PartKind::HorizontalLine => (formatters.horizontal_line)(),
            PartKind::Italic { text } => (formatters.italic)(text),
            PartKind::Link { text, url } => (formatters.link)(text, url),
            PartKind::Module { fqcn } => {
                let url = plugin_url(links, &PluginIdentifier::module(fqcn.as_str()));
                (formatters.module)(fqcn, url.as_deref())
            }
            PartKind::DocRef { text, reference } => (formatters.doc_ref)(text, reference),
            PartKind::Url { url } => (formatters.url)(url),
            PartKind::Text { text } => (formatters.text)(text),
            PartKind::EnvVariable { name } => (formatters.env_variable)(name),
            PartKind::OptionName(option) => {
                let url = option_like_url(links, option, OptionLikeKind::Option, current_plugin);
                (formatters.option_name)(option, url.as_deref())
            }
            PartKind::OptionValue { value } => (formatters.option_value)(value),
            PartKind::Plugin { plugin } => {
                let url = plugin_url(links, plugin);
                (formatters.plugin)(plugin, url.as_deref())
            }
            PartKind::ReturnValue(option) => {
                let url =
                    option_like_url(links, option, OptionLikeKind::ReturnValue, current_plugin);
                (formatters.return_value)(option, url.as_deref())
            }
        };
        destination.push(formatted);
    }
}

fn plugin_url(links: &LinkProviders, plugin: &PluginIdentifier) -> Option<String> {
    links.plugin_link.as_ref().and_then(|link| link(plugin))
}

fn option_like_url(
    links: &LinkProviders,
    option: &OptionLike,
    kind: OptionLikeKind,
    current_plugin: Option<&PluginIdentifier>,
) -> Option<String> {
    let plugin = option.plugin.as_ref()?;
    let link = links.plugin_option_like_link.as_ref()?;
    link(
        plugin,
        option.entrypoint.as_deref(),
        kind,
        &option.link_path,
        current_plugin == Some(plugin),
    )
}
