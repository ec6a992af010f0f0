//! Lexical rules, in priority order
//!
//! The scanner tries each rule at the cursor and takes the first that
//! matches, so order matters: numeric durations must beat years, the year
//! must beat the clock, and so on.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::Token;

/// What a matched rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lexeme {
    At,
    NumericDuration,
    Year,
    Month,
    Date,
    Weekday,
    Clock,
    BareDuration,
    Command,
    Option,
    Description,
    For,
    Colon,
    Ongoing,
    Period,
    Newline,
    Tab,
    Whitespace,
}

pub(crate) struct Rule {
    pub lexeme: Lexeme,
    pub pattern: Regex,
}

impl Rule {
    fn new(lexeme: Lexeme, pattern: &str) -> Self {
        Self {
            lexeme,
            pattern: Regex::new(&format!("^(?:{})", pattern)).unwrap(),
        }
    }

    /// Length of the match at the start of `rest`
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.pattern.find(rest).map(|m| m.end()).filter(|&len| len > 0)
    }
}

const MONTH_NAMES: &str =
    r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\b";
const WEEKDAY_NAMES: &str = r"(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b";
const IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_\-]*";

pub(crate) static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(Lexeme::At, "@"),
        Rule::new(Lexeme::NumericDuration, r"\d+ +(?:second|minute|hour)s?\b"),
        Rule::new(Lexeme::Year, r"\d{4}"),
        Rule::new(Lexeme::Month, MONTH_NAMES),
        Rule::new(
            Lexeme::Date,
            r"(?:[23]?1st|2?2nd|2?3rd|1[0-9]th|2[04-9]th|30th|[4-9]th)",
        ),
        Rule::new(Lexeme::Weekday, WEEKDAY_NAMES),
        Rule::new(Lexeme::Clock, r"\d?\d:\d\d(?:-\d?\d:\d\d)?"),
        Rule::new(Lexeme::BareDuration, r"(?:second|minute|hour)\b"),
        Rule::new(Lexeme::Command, &format!("!{}", IDENTIFIER)),
        Rule::new(Lexeme::Option, &format!("#{}", IDENTIFIER)),
        Rule::new(Lexeme::Description, r"\[[^\]\n]*\]"),
        Rule::new(Lexeme::For, r"for\b"),
        Rule::new(Lexeme::Colon, ":"),
        Rule::new(Lexeme::Ongoing, r"\.\.\."),
        Rule::new(Lexeme::Period, "-"),
        Rule::new(Lexeme::Newline, r"(?:\r?\n)+"),
        Rule::new(Lexeme::Tab, r"\t"),
        Rule::new(Lexeme::Whitespace, r"[ \r\f\v]+"),
    ]
});

impl Lexeme {
    /// Build the token for a matched lexeme; tabs and spaces have none
    pub fn token(self, text: &str) -> Option<Token> {
        let token = match self {
            Lexeme::At => Token::At,
            Lexeme::NumericDuration | Lexeme::BareDuration => {
                Token::Duration(text.split_whitespace().collect::<Vec<_>>().join(" "))
            }
            Lexeme::Year => Token::Year(text.to_string()),
            Lexeme::Month => Token::Month(text.to_string()),
            Lexeme::Date => Token::Date(text.to_string()),
            Lexeme::Weekday => Token::Weekday(text.to_string()),
            Lexeme::Clock => Token::Clock(text.to_string()),
            Lexeme::Command => Token::Command(text[1..].to_string()),
            Lexeme::Option => Token::Option(text[1..].to_string()),
            Lexeme::Description => Token::Description(text[1..text.len() - 1].to_string()),
            Lexeme::For => Token::For,
            Lexeme::Colon => Token::Colon,
            Lexeme::Ongoing => Token::Ongoing,
            Lexeme::Period => Token::Period,
            Lexeme::Newline => Token::Newline,
            Lexeme::Tab | Lexeme::Whitespace => return None,
        };
        Some(token)
    }
}

/// First rule matching at the start of `rest`, with its match length
pub(crate) fn match_rule(rest: &str) -> Option<(Lexeme, usize)> {
    RULES
        .iter()
        .find_map(|rule| rule.match_len(rest).map(|len| (rule.lexeme, len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("@", Lexeme::At, 1)]
    #[case("30 minutes", Lexeme::NumericDuration, 10)]
    #[case("1 hour", Lexeme::NumericDuration, 6)]
    #[case("2024", Lexeme::Year, 4)]
    #[case("2024 June", Lexeme::Year, 4)]
    #[case("June", Lexeme::Month, 4)]
    #[case("1st", Lexeme::Date, 3)]
    #[case("22nd", Lexeme::Date, 4)]
    #[case("13th", Lexeme::Date, 4)]
    #[case("31st", Lexeme::Date, 4)]
    #[case("Monday", Lexeme::Weekday, 6)]
    #[case("9:00", Lexeme::Clock, 4)]
    #[case("09:00-10:30", Lexeme::Clock, 11)]
    #[case("hour", Lexeme::BareDuration, 4)]
    #[case("!note", Lexeme::Command, 5)]
    #[case("#length", Lexeme::Option, 7)]
    #[case("[a b c]", Lexeme::Description, 7)]
    #[case("for", Lexeme::For, 3)]
    #[case(":", Lexeme::Colon, 1)]
    #[case("...", Lexeme::Ongoing, 3)]
    #[case("-", Lexeme::Period, 1)]
    #[case("\n\n\n", Lexeme::Newline, 3)]
    #[case("\t", Lexeme::Tab, 1)]
    #[case("  ", Lexeme::Whitespace, 2)]
    fn test_rule_priority(#[case] input: &str, #[case] lexeme: Lexeme, #[case] len: usize) {
        assert_eq!(match_rule(input), Some((lexeme, len)));
    }

    #[rstest]
    #[case("1th")]
    #[case("2st")]
    #[case("11st")]
    #[case("32nd")]
    fn test_bad_ordinals_are_not_dates(#[case] input: &str) {
        assert_ne!(match_rule(input).map(|(lexeme, _)| lexeme), Some(Lexeme::Date));
    }

    #[test]
    fn test_unmatched_input() {
        assert_eq!(match_rule("%"), None);
        assert_eq!(match_rule("[unclosed"), None);
    }

    #[test]
    fn test_tokens_strip_sigils() {
        assert_eq!(Lexeme::Command.token("!note"), Some(Token::Command("note".into())));
        assert_eq!(Lexeme::Description.token("[x y]"), Some(Token::Description("x y".into())));
        assert_eq!(
            Lexeme::NumericDuration.token("30   minutes"),
            Some(Token::Duration("30 minutes".into()))
        );
        assert_eq!(Lexeme::Tab.token("\t"), None);
    }
}
