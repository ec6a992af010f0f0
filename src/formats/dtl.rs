//! Canonical dtl text, as produced by [`Document::format`]

use super::registry::{FormatError, Formatter};
use crate::ast::Document;

pub struct DtlFormatter;

impl Formatter for DtlFormatter {
    fn name(&self) -> &str {
        "dtl"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.format())
    }

    fn description(&self) -> &str {
        "canonical dtl source"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_canonical_output() {
        let doc = parse("@2024 June\n\t@2nd [B]\n\t@1st [A]\n").unwrap();
        assert_eq!(
            DtlFormatter.serialize(&doc).unwrap(),
            "@2024 June\n\t@1st [A]\n\t@2nd [B]\n"
        );
    }
}
