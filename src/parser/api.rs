//! Public API for the parser.

use chumsky::prelude::*;
use serde::Serialize;

use super::combinators::ParserError;
use super::conversion::Converter;
use super::document::document;
use crate::ast::{Document, SourceLocation};
use crate::diagnostics::ValidationWarning;
use crate::error::ParseError;
use crate::lexer::{lex, lex_errors};

/// A parsed document together with its validation warnings
#[derive(Debug, Clone, Serialize)]
pub struct Parsed {
    pub document: Document,
    pub warnings: Vec<ValidationWarning>,
}

/// Parse a dtl document, keeping validation warnings
pub fn parse_document(source: &str) -> Result<Parsed, ParseError> {
    let tokens = lex(source);
    if let Some(error) = lex_errors(source, &tokens).into_iter().next() {
        return Err(error);
    }

    let raw = document()
        .parse(tokens)
        .map_err(|errors| convert_errors(source, errors))?;
    let (document, warnings) = Converter::new(source).convert(raw)?;
    Ok(Parsed { document, warnings })
}

/// Parse a dtl document; validation warnings are logged
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let parsed = parse_document(source)?;
    for warning in &parsed.warnings {
        log::warn!("{}", warning);
    }
    Ok(parsed.document)
}

/// Report the error that got furthest into the input
fn convert_errors(source: &str, errors: Vec<ParserError>) -> ParseError {
    let location = SourceLocation::new(source);
    let Some(error) = errors.into_iter().max_by_key(|error| error.span().start) else {
        return ParseError::UnexpectedEnd {
            expected: "segment".to_string(),
        };
    };

    let expected = error.label().unwrap_or("segment").to_string();
    match error.found() {
        Some((token, span)) => ParseError::UnexpectedToken {
            found: token.describe(),
            expected,
            position: location.byte_to_position(span.start),
        },
        None => ParseError::UnexpectedEnd { expected },
    }
}
