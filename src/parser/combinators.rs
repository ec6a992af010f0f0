//! Parser combinator functions for building the dtl parser.

use chumsky::prelude::*;
use std::ops::Range;

use super::intermediate_ast::{CommandWithSpans, TimeComponent, TimeLiteral};
use crate::ast::{CommandOption, Duration, OptionValue};
use crate::lexer::Token;

/// Type alias for token with span
pub(crate) type TokenSpan = (Token, Range<usize>);

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, ignoring the span
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// Helper: match a specific token type, keeping its byte span
pub(crate) fn token_span(
    t: Token,
) -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).map(|(_, span)| span)
}

pub(crate) fn newline() -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    token(Token::Newline).labelled("newline")
}

/// A single time component token
pub(crate) fn time_component() -> impl Parser<TokenSpan, TimeComponent, Error = ParserError> + Clone
{
    filter_map(|span, (tok, tok_span): TokenSpan| {
        match (tok.time_kind(), tok.value()) {
            (Some(kind), Some(text)) => Ok(TimeComponent {
                kind,
                text,
                span: tok_span,
            }),
            _ => Err(Simple::expected_input_found(
                span,
                None,
                Some((tok, tok_span)),
            )),
        }
    })
    .labelled("time component")
}

/// One or more adjacent time components
pub(crate) fn time_literal() -> impl Parser<TokenSpan, TimeLiteral, Error = ParserError> + Clone {
    time_component()
        .repeated()
        .at_least(1)
        .map(|components| TimeLiteral { components })
}

pub(crate) fn description() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, tok_span): TokenSpan| match tok {
        Token::Description(text) => Ok(text),
        other => Err(Simple::expected_input_found(
            span,
            None,
            Some((other, tok_span)),
        )),
    })
    .labelled("description")
}

fn duration() -> impl Parser<TokenSpan, Duration, Error = ParserError> + Clone {
    filter_map(|span, (tok, tok_span): TokenSpan| {
        let parsed = match &tok {
            Token::Duration(text) => Duration::parse(text),
            _ => None,
        };
        parsed.ok_or_else(|| Simple::expected_input_found(span, None, Some((tok, tok_span))))
    })
    .labelled("duration")
}

fn option_name() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, tok_span): TokenSpan| match tok {
        Token::Option(name) => Ok(name),
        other => Err(Simple::expected_input_found(
            span,
            None,
            Some((other, tok_span)),
        )),
    })
    .labelled("option")
}

fn command_name() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, tok_span): TokenSpan| match tok {
        Token::Command(name) => Ok(name),
        other => Err(Simple::expected_input_found(
            span,
            None,
            Some((other, tok_span)),
        )),
    })
    .labelled("command")
}

/// `#name [value]` followed by a newline
pub(crate) fn option_line() -> impl Parser<TokenSpan, CommandOption, Error = ParserError> + Clone {
    let value = duration()
        .map(OptionValue::Duration)
        .or(description().map(OptionValue::Text));

    option_name()
        .then(value.or_not())
        .then_ignore(newline())
        .map(|(name, value)| CommandOption::new(name, value.unwrap_or(OptionValue::Flag)))
}

/// `!name [description]` with an optional indented block of options
pub(crate) fn command() -> impl Parser<TokenSpan, CommandWithSpans, Error = ParserError> + Clone {
    let options = token(Token::Open)
        .ignore_then(option_line().repeated())
        .then_ignore(token(Token::Close).labelled("end of option block"));

    command_name()
        .then(description())
        .then_ignore(newline())
        .then(options.or_not())
        .map(|((name, description), options)| CommandWithSpans {
            name,
            description,
            options: options.unwrap_or_default(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DurationUnit, TimeKind};
    use crate::lexer::lex;

    #[test]
    fn test_time_literal() {
        let literal = time_literal()
            .then_ignore(newline())
            .parse(lex("2024 June 1st 9:00"))
            .unwrap();
        assert_eq!(
            literal.kinds(),
            vec![TimeKind::Year, TimeKind::Month, TimeKind::DayOfMonth, TimeKind::ClockTime]
        );
        assert_eq!(literal.span(), 0..18);
    }

    #[test]
    fn test_option_values() {
        let option = option_line().parse(lex("#length 15 minutes")).unwrap();
        assert_eq!(
            option.value,
            OptionValue::Duration(Duration::new(Some(15), DurationUnit::Minute))
        );

        let option = option_line().parse(lex("#room [B2]")).unwrap();
        assert_eq!(option.value, OptionValue::Text("B2".into()));

        let option = option_line().parse(lex("#billable")).unwrap();
        assert_eq!(option, CommandOption::flag("billable"));
    }

    #[test]
    fn test_command_with_options() {
        let command = command()
            .parse(lex("!note [Sync]\n\t#length hour\n\t#billable\n"))
            .unwrap();
        assert_eq!(command.name, "note");
        assert_eq!(command.description, "Sync");
        assert_eq!(command.options.len(), 2);
    }

    #[test]
    fn test_command_requires_description() {
        assert!(command().parse(lex("!note\n")).is_err());
    }
}
