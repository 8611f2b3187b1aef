//! Document parser
//!
//! Scans each paragraph once, alternating between literal text and command
//! invocations. Failing commands become [`Diagnostic`]s and are handled
//! according to [`ParsingOptions::errors`].
//!
//! ```rust,ignore
//! use plugdoc_parser::markup::{parse, ParsingOptions};
//!
//! let document = parse("See M(foo.bar.baz) and O(state=present).", &ParsingOptions::default())?;
//! assert_eq!(document[0].len(), 5);
//! ```

use super::arguments::{parse_escaped_args, parse_unescaped_args, Extraction};
use super::ast::{Document, Paragraph, Part, PartKind};
use super::commands::{Command, CommandInput, CommandMatch, CommandSet};
use super::error::{Diagnostic, MarkupError, ParseError};
use super::options::{ErrorPolicy, ParsingOptions, Whitespace};
use super::whitespace::normalize;

/// What to parse: one paragraph, or a list of paragraphs.
///
/// Diagnostics mention the paragraph number only for lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Text(&'a str),
    Paragraphs(Vec<&'a str>),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<Vec<&'a str>> for Input<'a> {
    fn from(paragraphs: Vec<&'a str>) -> Self {
        Input::Paragraphs(paragraphs)
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Input<'a> {
    fn from(paragraphs: [&'a str; N]) -> Self {
        Input::Paragraphs(paragraphs.to_vec())
    }
}

impl<'a> From<&[&'a str]> for Input<'a> {
    fn from(paragraphs: &[&'a str]) -> Self {
        Input::Paragraphs(paragraphs.to_vec())
    }
}

impl<'a> From<&'a [String]> for Input<'a> {
    fn from(paragraphs: &'a [String]) -> Self {
        Input::Paragraphs(paragraphs.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for Input<'a> {
    fn from(paragraphs: &'a Vec<String>) -> Self {
        Input::from(paragraphs.as_slice())
    }
}

/// Parses `input` with the built-in command table selected by `options`.
pub fn parse<'a>(input: impl Into<Input<'a>>, options: &ParsingOptions) -> Result<Document, ParseError> {
    Parser::new(options).parse(input)
}

/// A configured parser. Cheap to build; holds no state between calls.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    options: &'a ParsingOptions,
    commands: &'a CommandSet,
}

impl<'a> Parser<'a> {
    pub fn new(options: &'a ParsingOptions) -> Self {
        let commands = if options.only_classic_markup {
            CommandSet::classic()
        } else {
            CommandSet::semantic()
        };
        Self::with_commands(options, commands)
    }

    /// A parser recognizing exactly `commands`, regardless of
    /// `only_classic_markup`.
    pub fn with_commands(options: &'a ParsingOptions, commands: &'a CommandSet) -> Self {
        Self { options, commands }
    }

    pub fn parse<'i>(&self, input: impl Into<Input<'i>>) -> Result<Document, ParseError> {
        let input = input.into();
        let paragraphs = match &input {
            Input::Text(text) if text.is_empty() => Vec::new(),
            Input::Text(text) => vec![(*text, None)],
            Input::Paragraphs(paragraphs) => paragraphs
                .iter()
                .enumerate()
                .map(|(index, text)| (*text, Some(index + 1)))
                .collect(),
        };
        tracing::debug!(
            paragraphs = paragraphs.len(),
            errors = ?self.options.errors,
            whitespace = ?self.options.whitespace,
            "parsing markup"
        );
        paragraphs
            .into_iter()
            .map(|(text, number)| self.parse_paragraph(text, number))
            .collect()
    }

    /// Parses a single paragraph. `number` is the 1-based paragraph number
    /// reported in diagnostics, if any.
    pub fn parse_paragraph(&self, input: &str, number: Option<usize>) -> Result<Paragraph, ParseError> {
        let whitespace = self.options.whitespace;
        let bytes = input.as_bytes();
        let mut result = Vec::new();
        let mut index = 0;

        while index < input.len() {
            let Some(found) = self.commands.find_next(input, index) else {
                self.push_text(&mut result, &input[index..]);
                break;
            };
            let command = found.command;
            let strip = command.strip_surrounding_whitespace && whitespace != Whitespace::Ignore;

            let mut end_index = found.start;
            if strip {
                while end_index > index && matches!(bytes[end_index - 1], b' ' | b'\t') {
                    end_index -= 1;
                }
            }
            if end_index > index {
                self.push_text(&mut result, &input[index..end_index]);
            }

            tracing::trace!(command = command.name, offset = found.start, "matched command");
            let extraction = extract(input, &found);
            let mut next = extraction.end;
            let processed = extraction.into_result().and_then(|(args, _)| {
                (command.process)(&CommandInput {
                    args: &args,
                    options: self.options,
                    whitespace,
                })
            });
            if strip {
                while next < bytes.len() && matches!(bytes[next], b' ' | b'\t') {
                    next += 1;
                }
            }

            let source = &input[end_index..next];
            match processed {
                Ok(kind) => result.push(self.with_source(Part::new(kind), source)),
                Err(cause) => {
                    let diagnostic = self.diagnose(input, &found, next, number, cause);
                    match self.options.errors {
                        ErrorPolicy::Ignore => {
                            tracing::debug!(%diagnostic, "dropped failing command");
                        }
                        ErrorPolicy::Message => {
                            tracing::debug!(%diagnostic, "recovered failing command");
                            let part = Part::new(PartKind::Error {
                                message: diagnostic.to_string(),
                            });
                            result.push(self.with_source(part, source));
                        }
                        ErrorPolicy::Exception => return Err(diagnostic.into()),
                    }
                }
            }
            index = next;
        }

        Ok(result)
    }

    fn push_text(&self, result: &mut Paragraph, source: &str) {
        let text = normalize(source, self.options.whitespace, false, false);
        if !text.is_empty() {
            result.push(self.with_source(Part::text(text), source));
        }
    }

    fn with_source(&self, part: Part, source: &str) -> Part {
        if self.options.add_source {
            part.with_source(source)
        } else {
            part
        }
    }

    fn diagnose(
        &self,
        input: &str,
        found: &CommandMatch<'_>,
        end: usize,
        number: Option<usize>,
        cause: MarkupError,
    ) -> Diagnostic {
        let subject = if self.options.helpful_errors {
            format!("\"{}\"", &input[found.start..end])
        } else {
            found.command.display_name()
        };
        // Counted in UTF-16 code units.
        let position = input[..found.start]
            .chars()
            .map(char::len_utf16)
            .sum::<usize>()
            + 1;
        Diagnostic::new(subject, position, cause).in_paragraph(number)
    }
}

fn extract(input: &str, found: &CommandMatch<'_>) -> Extraction {
    let Command {
        parameters,
        escaped_arguments,
        ..
    } = *found.command;
    if escaped_arguments {
        parse_escaped_args(input, found.end, parameters)
    } else {
        parse_unescaped_args(input, found.end, parameters)
    }
}
