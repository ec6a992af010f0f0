//! Indentation transformation for the dtl lexer
//!
//! Turns the leading `Indent` tokens of each line into `Open`/`Close` block
//! tokens by comparing the line's depth with the previous non-blank line.
//!
//! # Rules
//!
//! - a line holding nothing but indentation is blank and changes nothing
//! - consecutive newlines collapse into one, newlines before the first real
//!   token are dropped
//! - a last line lacking its newline gets one
//! - every level still open at the end of input is closed
//!
//! Synthetic tokens get meaningful spans: an `Open` covers the tab it stands
//! for, a `Close` is the empty span at the start of the dedented line (or at
//! the end of input).
//!
//! Input tokens: `[At, Month, Newline, Indent, At, Date, Newline]`
//! Output tokens: `[At, Month, Newline, Open, At, Date, Newline, Close]`

use std::cmp::Ordering;
use std::ops::Range;

use super::tokens::Token;

type Spanned = (Token, Range<usize>);

pub fn transform_indentation(tokens: Vec<Spanned>) -> Vec<Spanned> {
    let end_of_input = tokens.last().map(|(_, span)| span.end).unwrap_or(0);
    let mut result = Vec::with_capacity(tokens.len());
    let mut current_level = 0;

    let mut tokens = tokens.into_iter().peekable();
    while tokens.peek().is_some() {
        // Gather one line
        let mut indents = Vec::new();
        while let Some((Token::Indent, _)) = tokens.peek() {
            if let Some((_, span)) = tokens.next() {
                indents.push(span);
            }
        }
        let mut content = Vec::new();
        let mut newline = None;
        for (token, span) in tokens.by_ref() {
            if token == Token::Newline {
                newline = Some(span);
                break;
            }
            content.push((token, span));
        }

        let Some(first_span) = content.first().map(|(_, span)| span.clone()) else {
            continue;
        };

        let target_level = indents.len();
        match target_level.cmp(&current_level) {
            Ordering::Greater => {
                for span in &indents[current_level..] {
                    result.push((Token::Open, span.clone()));
                }
            }
            Ordering::Less => {
                let at = first_span.start..first_span.start;
                for _ in target_level..current_level {
                    result.push((Token::Close, at.clone()));
                }
            }
            Ordering::Equal => {}
        }
        current_level = target_level;

        let line_end = content.last().map(|(_, span)| span.end).unwrap_or(first_span.end);
        result.extend(content);
        result.push((Token::Newline, newline.unwrap_or(line_end..line_end)));
    }

    for _ in 0..current_level {
        result.push((Token::Close, end_of_input..end_of_input));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lexer_impl::tokenize;

    fn transform(source: &str) -> Vec<Token> {
        transform_indentation(tokenize(source))
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_single_level() {
        assert_eq!(
            transform("@June\n\t@1st\n"),
            vec![
                Token::At,
                Token::Month("June".into()),
                Token::Newline,
                Token::Open,
                Token::At,
                Token::Date("1st".into()),
                Token::Newline,
                Token::Close,
            ]
        );
    }

    #[test]
    fn test_multi_level_dedent() {
        let tokens = transform("@2024\n\t@June\n\t\t@1st\n@2025\n");
        let structure: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t, Token::Open | Token::Close | Token::At))
            .cloned()
            .collect();
        assert_eq!(
            structure,
            vec![
                Token::At,
                Token::Open,
                Token::At,
                Token::Open,
                Token::At,
                Token::Close,
                Token::Close,
                Token::At,
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(
            transform("\n\n@June\n\n\t\t\n\t@1st\n\n"),
            transform("@June\n\t@1st\n")
        );
    }

    #[test]
    fn test_missing_final_newline() {
        assert_eq!(transform("@June"), transform("@June\n"));
    }

    #[test]
    fn test_closes_at_end_of_input() {
        let tokens = transform_indentation(tokenize("@June\n\t@1st\n\t\t@9:00\n"));
        let closes: Vec<_> = tokens
            .iter()
            .filter(|(t, _)| *t == Token::Close)
            .map(|(_, span)| span.clone())
            .collect();
        assert_eq!(closes, vec![20..20, 20..20]);
    }

    #[test]
    fn test_open_spans_cover_tabs() {
        let tokens = transform_indentation(tokenize("@June\n\t\t@1st\n"));
        let opens: Vec<_> = tokens
            .iter()
            .filter(|(t, _)| *t == Token::Open)
            .map(|(_, span)| span.clone())
            .collect();
        assert_eq!(opens, vec![6..7, 7..8]);
    }

    #[test]
    fn test_empty() {
        assert!(transform("").is_empty());
        assert!(transform("\n\n\t\n").is_empty());
    }
}
