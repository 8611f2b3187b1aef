//! Error types for markup parsing
//!
//! A failing command produces a [`MarkupError`] (the cause). The parser wraps
//! it in a [`Diagnostic`] that knows where the command started and, when the
//! input was a list of paragraphs, which paragraph it was in. Under the
//! `exception` policy the diagnostic is returned as a [`ParseError`].

use std::fmt;
use thiserror::Error;

/// Why a single command could not be turned into a part.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("Cannot find comma separating parameter {0} from the next one")]
    MissingComma(usize),

    #[error("Cannot find closing \")\" after last parameter")]
    MissingClosingParenthesis,

    #[error("Module name \"{0}\" is not a FQCN")]
    ModuleNotFqcn(String),

    #[error("Plugin name \"{0}\" is not a FQCN")]
    PluginNotFqcn(String),

    #[error("Plugin type \"{0}\" is not valid")]
    InvalidPluginType(String),

    #[error("Parameter \"{0}\" is not of the form FQCN#type")]
    MalformedPluginReference(String),

    #[error("Role reference is missing entrypoint")]
    MissingRoleEntrypoint,

    #[error("Invalid option/return value name \"{0}\"")]
    InvalidOptionName(String),

    /// Raised by caller-registered commands.
    #[error("{0}")]
    Custom(String),
}

impl MarkupError {
    pub fn custom(message: impl Into<String>) -> Self {
        MarkupError::Custom(message.into())
    }
}

/// A positioned markup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Either the quoted source of the command or its bare name (`M()`).
    pub subject: String,
    /// 1-based UTF-16 offset of the command inside its paragraph.
    pub position: usize,
    /// 1-based paragraph number, only set when parsing a list of paragraphs.
    pub paragraph: Option<usize>,
    pub cause: MarkupError,
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, position: usize, cause: MarkupError) -> Self {
        Self {
            subject: subject.into(),
            position,
            paragraph: None,
            cause,
        }
    }

    pub fn in_paragraph(mut self, paragraph: Option<usize>) -> Self {
        self.paragraph = paragraph;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "While parsing {} at index {}",
            self.subject, self.position
        )?;
        if let Some(paragraph) = self.paragraph {
            write!(f, " of paragraph {}", paragraph)?;
        }
        write!(f, ": {}", self.cause)
    }
}

/// Parsing aborted under the `exception` error policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{diagnostic}")]
pub struct ParseError {
    pub diagnostic: Diagnostic,
}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
