//! Inline documentation markup
//!
//! Parses strings such as `Use O(state=present) with M(foo.bar.baz).` into a
//! [`Document`] of typed [`Part`]s. See [`parser`] for the scan loop and
//! [`commands`] for the recognized commands.

pub mod arguments;
pub mod ast;
pub mod commands;
pub mod error;
pub mod options;
pub mod parser;
pub mod references;
pub mod testing;
pub mod validation;
pub mod whitespace;

pub use ast::{Document, OptionLike, Paragraph, Part, PartKind, PluginIdentifier};
pub use commands::{Command, CommandInput, CommandSet};
pub use error::{Diagnostic, MarkupError, ParseError};
pub use options::{ErrorPolicy, ParsingOptions, Whitespace};
pub use parser::{parse, Input, Parser};
pub use validation::{is_fqcn, is_plugin_type};
