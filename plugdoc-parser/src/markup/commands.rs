//! Command table
//!
//! Commands are plain records: a name, an argument count, the argument grammar
//! and a constructor turning the arguments into a [`PartKind`]. A
//! [`CommandSet`] indexes a list of them for scanning. Adding a command means
//! adding a record; the scan loop does not change.
//!
//! In source text a command is its name at a word boundary, followed by `(`
//! when it takes arguments or by another word boundary when it does not.

use super::ast::{PartKind, PluginIdentifier};
use super::error::MarkupError;
use super::options::{ParsingOptions, Whitespace};
use super::references::parse_option_like;
use super::validation::{is_fqcn, is_plugin_type};
use super::whitespace::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

/// Everything a constructor gets to see.
#[derive(Debug, Clone, Copy)]
pub struct CommandInput<'a> {
    pub args: &'a [String],
    pub options: &'a ParsingOptions,
    pub whitespace: Whitespace,
}

impl CommandInput<'_> {
    /// The `index`-th argument; the scanner always passes exactly as many
    /// arguments as the command declares.
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map_or("", String::as_str)
    }
}

pub type CommandFn = fn(&CommandInput<'_>) -> Result<PartKind, MarkupError>;

#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub parameters: usize,
    /// Use the backslash-escaping argument grammar.
    pub escaped_arguments: bool,
    /// Swallow spaces and tabs on both sides of the command (only when
    /// whitespace normalization is on).
    pub strip_surrounding_whitespace: bool,
    pub process: CommandFn,
}

impl Command {
    pub const fn new(name: &'static str, parameters: usize, process: CommandFn) -> Self {
        Self {
            name,
            parameters,
            escaped_arguments: false,
            strip_surrounding_whitespace: false,
            process,
        }
    }

    pub const fn escaped(mut self) -> Self {
        self.escaped_arguments = true;
        self
    }

    pub const fn stripping_surrounding_whitespace(mut self) -> Self {
        self.strip_surrounding_whitespace = true;
        self
    }

    /// How the command is named in diagnostics without source: `M()`, `HORIZONTALLINE`.
    pub fn display_name(&self) -> String {
        if self.parameters > 0 {
            format!("{}()", self.name)
        } else {
            self.name.to_string()
        }
    }
}

/// A command occurrence in the input.
#[derive(Debug, Clone, Copy)]
pub struct CommandMatch<'a> {
    pub command: &'a Command,
    /// Byte offset of the command name.
    pub start: usize,
    /// Byte offset right after the name, or after the `(` for commands with
    /// arguments.
    pub end: usize,
}

/// An ordered list of commands plus the matcher compiled from it.
///
/// When several commands match at the same position, the one listed first wins.
#[derive(Debug, Clone)]
pub struct CommandSet {
    commands: Vec<Command>,
    matcher: Option<Regex>,
}

impl CommandSet {
    pub fn new(commands: Vec<Command>) -> Self {
        let matcher = compile_matcher(&commands);
        Self { commands, matcher }
    }

    /// All thirteen commands.
    pub fn semantic() -> &'static CommandSet {
        &SEMANTIC
    }

    /// The eight commands that predate semantic markup.
    pub fn classic() -> &'static CommandSet {
        &CLASSIC
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Finds the leftmost command occurrence at or after byte offset `from`.
    pub fn find_next(&self, input: &str, from: usize) -> Option<CommandMatch<'_>> {
        let captures = self.matcher.as_ref()?.captures_at(input, from)?;
        let whole = captures.get(0)?;
        // Group `i + 1` belongs to the `i`-th command.
        let index = captures.iter().skip(1).position(|group| group.is_some())?;
        Some(CommandMatch {
            command: &self.commands[index],
            start: whole.start(),
            end: whole.end(),
        })
    }
}

/// One capture group per command, in table order. Alternation is
/// leftmost-first, which gives the table order priority at equal positions.
/// `\b` is ASCII-only.
fn compile_matcher(commands: &[Command]) -> Option<Regex> {
    if commands.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = commands
        .iter()
        .map(|command| {
            let name = regex::escape(command.name);
            if command.parameters > 0 {
                format!(r"({name})\(")
            } else {
                format!(r"({name})(?-u:\b)")
            }
        })
        .collect();
    let pattern = format!(r"(?-u:\b)(?:{})", alternatives.join("|"));
    match Regex::new(&pattern) {
        Ok(matcher) => Some(matcher),
        Err(error) => {
            tracing::error!(%error, "could not compile command matcher");
            None
        }
    }
}

// The type may not contain line terminators.
static PLUGIN_ARGUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^#]*)#([^\n\r\x{2028}\x{2029}]*)$").unwrap());

fn italic(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::Italic {
        text: normalize(input.arg(0), input.whitespace, false, false),
    })
}

fn bold(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::Bold {
        text: normalize(input.arg(0), input.whitespace, false, false),
    })
}

fn module(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    let fqcn = input.arg(0);
    if !is_fqcn(fqcn) {
        return Err(MarkupError::ModuleNotFqcn(fqcn.to_string()));
    }
    Ok(PartKind::Module {
        fqcn: fqcn.to_string(),
    })
}

fn url(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::Url {
        url: input.arg(0).to_string(),
    })
}

fn link(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::Link {
        text: normalize(input.arg(0), input.whitespace, false, true),
        url: input.arg(1).to_string(),
    })
}

fn doc_ref(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::DocRef {
        text: normalize(input.arg(0), input.whitespace, false, true),
        reference: input.arg(1).to_string(),
    })
}

fn code(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::Code {
        text: normalize(input.arg(0), input.whitespace, true, true),
    })
}

fn horizontal_line(_input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::HorizontalLine)
}

fn plugin(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    let argument = input.arg(0);
    let captures = PLUGIN_ARGUMENT
        .captures(argument)
        .ok_or_else(|| MarkupError::MalformedPluginReference(argument.to_string()))?;
    let fqcn = &captures[1];
    if !is_fqcn(fqcn) {
        return Err(MarkupError::PluginNotFqcn(fqcn.to_string()));
    }
    let plugin_type = &captures[2];
    if !is_plugin_type(plugin_type) {
        return Err(MarkupError::InvalidPluginType(plugin_type.to_string()));
    }
    Ok(PartKind::Plugin {
        plugin: PluginIdentifier::new(fqcn, plugin_type),
    })
}

fn env_variable(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::EnvVariable {
        name: normalize(input.arg(0), input.whitespace, true, true),
    })
}

fn option_value(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    Ok(PartKind::OptionValue {
        value: normalize(input.arg(0), input.whitespace, true, true),
    })
}

fn option_name(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    let text = normalize(input.arg(0), input.whitespace, true, true);
    parse_option_like(&text, input.options).map(PartKind::OptionName)
}

fn return_value(input: &CommandInput<'_>) -> Result<PartKind, MarkupError> {
    let text = normalize(input.arg(0), input.whitespace, true, true);
    parse_option_like(&text, input.options).map(PartKind::ReturnValue)
}

const CLASSIC_COMMANDS: [Command; 8] = [
    Command::new("I", 1, italic),
    Command::new("B", 1, bold),
    Command::new("M", 1, module),
    Command::new("U", 1, url),
    Command::new("L", 2, link),
    Command::new("R", 2, doc_ref),
    Command::new("C", 1, code),
    Command::new("HORIZONTALLINE", 0, horizontal_line).stripping_surrounding_whitespace(),
];

const SEMANTIC_COMMANDS: [Command; 5] = [
    Command::new("P", 1, plugin).escaped(),
    Command::new("E", 1, env_variable).escaped(),
    Command::new("V", 1, option_value).escaped(),
    Command::new("O", 1, option_name).escaped(),
    Command::new("RV", 1, return_value).escaped(),
];

static CLASSIC: Lazy<CommandSet> = Lazy::new(|| CommandSet::new(CLASSIC_COMMANDS.to_vec()));

static SEMANTIC: Lazy<CommandSet> = Lazy::new(|| {
    CommandSet::new(
        CLASSIC_COMMANDS
            .iter()
            .chain(SEMANTIC_COMMANDS.iter())
            .copied()
            .collect(),
    )
});
