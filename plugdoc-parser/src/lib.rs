//! # plugdoc-parser
//!
//! Parser for the inline markup used in plugin documentation strings.
//!
//! The parser is a single pass over each paragraph: literal text is copied
//! (optionally whitespace-normalized) and commands like `B(...)`, `M(...)` or
//! `O(...)` are turned into typed parts. Nothing is resolved against a plugin
//! registry; references are only validated and recorded.
//!
//! Layout
//!
//! src/markup
//!   ├── ast          Document model
//!   ├── arguments    The two argument grammars
//!   ├── whitespace   Whitespace normalization
//!   ├── commands     Command table and matcher
//!   ├── references   O(...) / RV(...) resolution
//!   └── parser       Entry point and error policies
//!
//! For test helpers, see the [testing module](markup::testing).

pub mod markup;

pub use markup::{parse, Document, ParseError, ParsingOptions};
