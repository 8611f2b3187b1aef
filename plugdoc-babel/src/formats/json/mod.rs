//! JSON format implementation
//!
//! Dumps the document model as JSON, one array per paragraph, parts tagged
//! by `type`. This is the only format that can be read back.

use crate::error::FormatError;
use crate::format::Format;
use plugdoc_parser::markup::Document;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "The parsed document model as JSON"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(serde_json::from_str(source)?)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugdoc_parser::markup::{OptionLike, Part, PluginIdentifier};

    #[test]
    fn test_serialize() {
        let doc = vec![vec![Part::text("a"), Part::horizontal_line().with_source("HORIZONTALLINE")]];
        let json = JsonFormat.serialize(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([[
                { "type": "text", "text": "a" },
                { "type": "horizontal_line", "source": "HORIZONTALLINE" }
            ]])
        );
    }

    #[test]
    fn test_parse_back() {
        let doc = vec![
            vec![Part::return_value(OptionLike {
                plugin: Some(PluginIdentifier::new("a.b.c", "role")),
                entrypoint: Some("main".to_string()),
                link_path: vec!["x".to_string(), "y".to_string()],
                name: "x[0].y".to_string(),
                value: None,
            })],
            vec![],
        ];
        let json = JsonFormat.serialize(&doc).unwrap();
        assert_eq!(JsonFormat.parse(&json).unwrap(), doc);
    }

    #[test]
    fn test_parse_invalid() {
        let error = JsonFormat.parse("[[{\"type\": \"nope\"}]]").unwrap_err();
        assert!(matches!(error, FormatError::Json(_)));
    }
}
