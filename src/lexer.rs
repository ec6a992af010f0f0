//! Lexer module for the dtl format
//!
//! Tokenization runs in two stages:
//!
//! 1. [`tokenize`] scans the text with an ordered rule table and emits one
//!    `Indent` token per leading tab,
//! 2. [`transform_indentation`] replaces those by `Open`/`Close` block tokens
//!    from the depth change between lines.
//!
//! Block tokens map onto braces, which keeps the grammar an ordinary
//! recursive descent without any indentation bookkeeping.

pub mod indentation_transform;
pub mod lexer_impl;
pub(crate) mod rules;
pub mod tokens;

use std::ops::Range;

pub use indentation_transform::transform_indentation;
pub use lexer_impl::{tokenize, tokenize_kinds};
pub use tokens::Token;

use crate::ast::SourceLocation;
use crate::error::ParseError;

/// Fully processed tokens with their byte spans
pub fn lex(source: &str) -> Vec<(Token, Range<usize>)> {
    let source_with_newline = if !source.is_empty() && !source.ends_with('\n') {
        format!("{}\n", source)
    } else {
        source.to_string()
    };

    let tokens = transform_indentation(tokenize(&source_with_newline));
    log::debug!("lexed {} tokens from {} bytes", tokens.len(), source.len());
    tokens
}

/// Every `Error` token in the stream, as a positioned error
pub fn lex_errors(source: &str, tokens: &[(Token, Range<usize>)]) -> Vec<ParseError> {
    let location = SourceLocation::new(source);
    tokens
        .iter()
        .filter_map(|(token, span)| match token {
            Token::Error(found) => Some(ParseError::UnexpectedCharacter {
                found: *found,
                position: location.byte_to_position(span.start),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Position;

    #[test]
    fn test_lex_adds_final_newline() {
        let tokens: Vec<_> = lex("@June").into_iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::At, Token::Month("June".into()), Token::Newline]);
    }

    #[test]
    fn test_lex_errors_have_positions() {
        let source = "@June\n\t@1st %\n";
        let errors = lex_errors(source, &lex(source));
        assert_eq!(
            errors,
            vec![ParseError::UnexpectedCharacter {
                found: '%',
                position: Position::new(2, 7),
            }]
        );
    }

    #[test]
    fn test_clean_input_has_no_errors() {
        let source = "for 2024:\n\n@June [x]\n";
        assert!(lex_errors(source, &lex(source)).is_empty());
    }
}
