//! Token stream serialization

use serde::Serialize;
use std::ops::Range;

use crate::lexer::Token;

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    value: Option<String>,
    span: &'a Range<usize>,
}

/// One token per line as `Kind(value)`
pub fn tokens_to_simple(tokens: &[(Token, Range<usize>)]) -> String {
    let mut result = String::new();
    for (token, _) in tokens {
        result.push_str(&token.to_string());
        result.push('\n');
    }
    result
}

/// Pretty JSON array of `{kind, value, span}` records
pub fn tokens_to_json(tokens: &[(Token, Range<usize>)]) -> Result<String, serde_json::Error> {
    let records: Vec<TokenRecord<'_>> = tokens
        .iter()
        .map(|(token, span)| TokenRecord {
            kind: token.kind_name(),
            value: token.value(),
            span,
        })
        .collect();
    serde_json::to_string_pretty(&records)
}
