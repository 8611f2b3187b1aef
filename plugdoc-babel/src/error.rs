//! Error type for format lookup and rendering

use plugdoc_parser::markup::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    #[error("{0}")]
    NotSupported(String),

    /// Markup source failed to parse under the `exception` policy.
    #[error(transparent)]
    Markup(#[from] ParseError),

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}
