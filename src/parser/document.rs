//! Document-level grammar
//!
//! ```text
//! Document := ('for' TimeToken+ ':' NL)? Segment* EOF
//! Segment  := '@' TimeToken+ ('-' TimeToken+)? '...'? Desc? NL Block?
//! Block    := OPEN (Segment | Command)* END
//! Command  := '!'name Desc NL (OPEN Option* END)?
//! Option   := '#'name (Duration | Desc | nothing) NL
//! ```

use chumsky::prelude::*;

use super::combinators::{
    command, description, newline, time_literal, token, token_span, ParserError, TokenSpan,
};
use super::intermediate_ast::{DocumentWithSpans, EntryWithSpans, SegmentWithSpans};
use crate::lexer::Token;

/// Build the segment parser; blocks nest segments recursively
pub(crate) fn segment() -> impl Parser<TokenSpan, SegmentWithSpans, Error = ParserError> + Clone {
    recursive(|segment| {
        let entry = segment
            .map(EntryWithSpans::Segment)
            .or(command().map(EntryWithSpans::Command));

        let block = token(Token::Open)
            .ignore_then(entry.repeated())
            .then_ignore(token(Token::Close).labelled("segment, command or end of block"));

        let period_end = token_span(Token::Period).then(time_literal());

        token_span(Token::At)
            .labelled("'@'")
            .then(time_literal())
            .then(period_end.or_not())
            .then(token(Token::Ongoing).or_not().map(|ongoing| ongoing.is_some()))
            .then(description().or_not())
            .then_ignore(newline())
            .then(block.or_not())
            .map(
                |(((((marker, start), end), ongoing), description), block)| SegmentWithSpans {
                    marker,
                    start,
                    end,
                    ongoing,
                    description,
                    block: block.unwrap_or_default(),
                },
            )
    })
}

/// Parse a whole token stream
pub(crate) fn document() -> impl Parser<TokenSpan, DocumentWithSpans, Error = ParserError> + Clone {
    let header = token(Token::For)
        .ignore_then(time_literal())
        .then_ignore(token(Token::Colon).labelled("':'"))
        .then_ignore(newline());

    header
        .or_not()
        .then(segment().repeated())
        .then_ignore(end().labelled("segment or end of input"))
        .map(|(header, segments)| DocumentWithSpans { header, segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_segment_with_period_and_block() {
        let raw = segment()
            .parse(lex("@9:00-June 2nd [Trip]\n\t!note [x]\n\t@10:00\n"))
            .unwrap();
        assert_eq!(raw.marker, 0..1);
        assert_eq!(raw.start.components.len(), 1);
        assert!(raw.end.is_some());
        assert_eq!(raw.description.as_deref(), Some("Trip"));
        assert_eq!(raw.block.len(), 2);
        assert!(matches!(raw.block[0], EntryWithSpans::Command(_)));
        assert!(matches!(raw.block[1], EntryWithSpans::Segment(_)));
    }

    #[test]
    fn test_document_header() {
        let raw = document().parse(lex("for 2024 June:\n\n@1st\n")).unwrap();
        assert_eq!(raw.header.map(|h| h.components.len()), Some(2));
        assert_eq!(raw.segments.len(), 1);
    }

    #[test]
    fn test_ongoing_marker() {
        let raw = segment().parse(lex("@9:00... [Work]\n")).unwrap();
        assert!(raw.ongoing);
    }

    #[test]
    fn test_stray_token_fails_document() {
        assert!(document().parse(lex("@June\n\t#length hour\n")).is_err());
        assert!(document().parse(lex("[loose]\n")).is_err());
    }

    #[test]
    fn test_empty_document() {
        let raw = document().parse(lex("")).unwrap();
        assert!(raw.header.is_none());
        assert!(raw.segments.is_empty());
    }
}
