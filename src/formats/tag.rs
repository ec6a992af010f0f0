//! XML-like tag serialization of the document tree
//!
//! ## Format
//!
//! - Node type → tag name
//! - Node label (fully qualified time, markers, description) → text content
//! - Commands → nested in `<commands>`, options in `<options>`
//! - Child segments → nested in `<children>`
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <segment>@2024 June<children>
//!     <segment>@2024 June 1st 09:00-09:15 [Standup]<commands>
//!       <command>!note [Daily sync]<options>
//!         <option>#length 15 minutes</option>
//!       </options></command>
//!     </commands></segment>
//!   </children></segment>
//! </document>
//! ```

use super::registry::{FormatError, Formatter};
use crate::ast::{AstNode, Command, Document, OptionValue, Segment};

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_document(doc))
    }

    fn description(&self) -> &str {
        "XML-like tree with fully qualified times"
    }
}

/// Serialize a document to the tag format
pub fn serialize_document(doc: &Document) -> String {
    let mut result = String::new();
    if doc.header.is_empty() {
        result.push_str("<document>\n");
    } else {
        result.push_str(&format!(
            "<document for=\"{}\">\n",
            escape_xml(&doc.header.to_string())
        ));
    }
    for segment in doc.iter_segments() {
        serialize_segment(segment, 1, &mut result);
    }
    result.push_str("</document>");
    result
}

fn serialize_segment(segment: &Segment, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    output.push_str(&format!("{}<segment>", indent));
    output.push_str(&escape_xml(&segment.display_label()));

    if segment.commands.is_empty() && segment.children.is_empty() {
        output.push_str("</segment>\n");
        return;
    }

    if !segment.commands.is_empty() {
        output.push_str("<commands>\n");
        for command in &segment.commands {
            serialize_command(command, indent_level + 1, output);
        }
        output.push_str(&format!("{}</commands>", indent));
    }
    if !segment.children.is_empty() {
        output.push_str("<children>\n");
        for child in segment.child_segments() {
            serialize_segment(child, indent_level + 1, output);
        }
        output.push_str(&format!("{}</children>", indent));
    }
    output.push_str("</segment>\n");
}

fn serialize_command(command: &Command, indent_level: usize, output: &mut String) {
    let indent = "  ".repeat(indent_level);
    output.push_str(&format!("{}<command>", indent));
    output.push_str(&escape_xml(&format!(
        "{} [{}]",
        command.display_label(),
        command.description
    )));

    if command.options.is_empty() {
        output.push_str("</command>\n");
        return;
    }

    output.push_str("<options>\n");
    let option_indent = "  ".repeat(indent_level + 1);
    for option in &command.options {
        let text = match &option.value {
            OptionValue::Duration(duration) => format!("#{} {}", option.name, duration),
            OptionValue::Text(text) => format!("#{} [{}]", option.name, text),
            OptionValue::Flag => format!("#{}", option.name),
        };
        output.push_str(&format!(
            "{}<option>{}</option>\n",
            option_indent,
            escape_xml(&text)
        ));
    }
    output.push_str(&format!("{}</options></command>\n", indent));
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_serialize_nested() {
        let doc = parse("@2024 June\n\t@1st 09:00-09:15 [Standup]\n\t\t!note [Daily sync]\n\t\t\t#length 15 minutes\n").unwrap();
        insta::assert_snapshot!(serialize_document(&doc), @r###"
        <document>
          <segment>@2024 June<children>
            <segment>@2024 June 1st 09:00-09:15 [Standup]<commands>
              <command>!note [Daily sync]<options>
                <option>#length 15 minutes</option>
              </options></command>
            </commands></segment>
          </children></segment>
        </document>
        "###);
    }

    #[test]
    fn test_header_attribute_and_escaping() {
        let doc = parse("for 2024:\n\n@June [R&D <team>]\n").unwrap();
        assert_eq!(
            serialize_document(&doc),
            "<document for=\"2024\">\n  <segment>@2024 June [R&amp;D &lt;team&gt;]</segment>\n</document>"
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert_eq!(serialize_document(&doc), "<document>\n</document>");
    }
}
