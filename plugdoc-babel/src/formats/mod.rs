//! Format implementations
//!
//! This module contains all format implementations that render a parsed
//! markup document as text.

pub mod ansible_doc_text;
pub mod html;
pub mod json;
pub mod markdown;
pub mod rst;

pub use ansible_doc_text::AnsibleDocTextFormat;
pub use html::HtmlFormat;
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use rst::RstFormat;
