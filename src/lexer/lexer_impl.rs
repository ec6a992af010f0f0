//! Raw tokenization for the dtl lexer
//!
//! A single left-to-right scan over the rule table. Leading tabs become
//! `Indent` tokens; every other tab and all spaces are dropped. Input that
//! matches no rule yields one `Error` token per character and scanning
//! carries on.

use std::ops::Range;

use super::rules::{match_rule, Lexeme};
use super::tokens::Token;

pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut at_line_start = true;

    while pos < source.len() {
        let rest = &source[pos..];
        let (lexeme, len) = match match_rule(rest) {
            Some(matched) => matched,
            None => {
                // match_rule only fails on a non-empty remainder
                let c = rest.chars().next().unwrap_or('\0');
                let len = c.len_utf8();
                tokens.push((Token::Error(c), pos..pos + len));
                at_line_start = false;
                pos += len;
                continue;
            }
        };
        let span = pos..pos + len;
        let text = &source[span.clone()];

        match lexeme {
            Lexeme::Tab if at_line_start => tokens.push((Token::Indent, span)),
            Lexeme::Newline => {
                tokens.push((Token::Newline, span));
                at_line_start = true;
            }
            _ => {
                if let Some(token) = lexeme.token(text) {
                    tokens.push((token, span));
                    at_line_start = false;
                }
            }
        }
        pos += len;
    }

    tokens
}

/// Tokenize and drop the spans
pub fn tokenize_kinds(source: &str) -> Vec<Token> {
    tokenize(source).into_iter().map(|(token, _)| token).collect()
}
