//! JSON serialization of the document tree
//!
//! Children are emitted as flat arrays in sorted order; times carry every
//! component in rendered form (`"June"`, `"1st"`, `"09:00"`) or `null`.

use super::registry::{FormatError, Formatter};
use crate::ast::Document;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "serde_json tree"
    }
}
