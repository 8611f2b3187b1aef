//! Renderers for plugin documentation markup
//!
//!     This crate turns the document model produced by `plugdoc-parser` into text: HTML,
//!     Markdown, reStructuredText and the plain text `ansible-doc` prints. The parser stays
//!     renderer agnostic; everything output specific lives here.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all formats (serialization and, for json, parsing)
//!     - FormatRegistry: lookup of formats by name
//!     - Format implementations: one module per output format
//!     - common: the part dispatch shared by all renderers, plus URI and line helpers
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── options.rs              # formatter overrides and link providers
//!     ├── common
//!     │   ├── dispatch.rs         # Part -> formatter dispatch
//!     │   ├── text.rs
//!     │   └── uri.rs
//!     ├── formats
//!     │   ├── <format>
//!     │   │   └── mod.rs
//!     ├── lib.rs
//!
//! Rendering
//!
//!     Every renderer owns a complete set of default formatters, one per part kind. Callers can
//!     replace any of them through `FormatOverrides`; the missing ones are taken from the
//!     defaults when rendering starts. Links are never guessed: plugin, option and return value
//!     references only become links when the caller's `LinkProviders` return a URL.
//!
//!     Renderers never fail. Error parts (see the `message` error policy of the parser) are
//!     rendered inline like any other part.
//!
pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::ansible_doc_text::{to_ansible_doc_text, AnsibleDocTextOptions};
pub use formats::html::{to_html, HtmlOptions, HtmlStyle};
pub use formats::markdown::{to_md, MarkdownOptions};
pub use formats::rst::{to_rst, RstOptions, RstStyle};
pub use options::{FormatOverrides, FormatterSet, LinkProviders, OptionLikeKind};
pub use registry::FormatRegistry;
