//! Token definitions for the dtl format
//!
//! Tokens carry the text they need later: time components keep their full
//! lexeme for the time grammar, commands and options keep the bare name,
//! descriptions the text between the brackets.

use serde::Serialize;
use std::fmt;

use crate::ast::TimeKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Token {
    // Structure
    At,
    For,
    Colon,
    Period,
    Ongoing,
    Newline,
    /// One leading tab; only produced by the raw tokenize stage
    Indent,
    Open,
    Close,

    // Time components
    Year(String),
    Month(String),
    Date(String),
    Weekday(String),
    /// `H:MM`, possibly followed by the `-H:MM` shorthand end
    Clock(String),

    // Annotations
    Duration(String),
    Command(String),
    Option(String),
    Description(String),

    Error(char),
}

impl Token {
    /// The time component this token specifies, if any
    pub fn time_kind(&self) -> Option<TimeKind> {
        match self {
            Token::Year(_) => Some(TimeKind::Year),
            Token::Month(_) => Some(TimeKind::Month),
            Token::Date(_) => Some(TimeKind::DayOfMonth),
            Token::Weekday(_) => Some(TimeKind::Weekday),
            Token::Clock(_) => Some(TimeKind::ClockTime),
            _ => None,
        }
    }

    pub fn is_time(&self) -> bool {
        self.time_kind().is_some()
    }

    /// Variant name, as used by the token serializers
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::At => "At",
            Token::For => "For",
            Token::Colon => "Colon",
            Token::Period => "Period",
            Token::Ongoing => "Ongoing",
            Token::Newline => "Newline",
            Token::Indent => "Indent",
            Token::Open => "Open",
            Token::Close => "Close",
            Token::Year(_) => "Year",
            Token::Month(_) => "Month",
            Token::Date(_) => "Date",
            Token::Weekday(_) => "Weekday",
            Token::Clock(_) => "Clock",
            Token::Duration(_) => "Duration",
            Token::Command(_) => "Command",
            Token::Option(_) => "Option",
            Token::Description(_) => "Description",
            Token::Error(_) => "Error",
        }
    }

    /// Carried text, for tokens that have one
    pub fn value(&self) -> Option<String> {
        match self {
            Token::Year(text)
            | Token::Month(text)
            | Token::Date(text)
            | Token::Weekday(text)
            | Token::Clock(text)
            | Token::Duration(text)
            | Token::Command(text)
            | Token::Option(text)
            | Token::Description(text) => Some(text.clone()),
            Token::Error(c) => Some(c.to_string()),
            _ => None,
        }
    }

    /// Human readable form for error messages
    pub fn describe(&self) -> String {
        match self {
            Token::At => "'@'".to_string(),
            Token::For => "'for'".to_string(),
            Token::Colon => "':'".to_string(),
            Token::Period => "'-'".to_string(),
            Token::Ongoing => "'...'".to_string(),
            Token::Newline => "newline".to_string(),
            Token::Indent | Token::Open => "indentation".to_string(),
            Token::Close => "dedent".to_string(),
            Token::Command(name) => format!("command '!{}'", name),
            Token::Option(name) => format!("option '#{}'", name),
            Token::Description(text) => format!("description '[{}]'", text),
            Token::Error(c) => format!("{:?}", c),
            Token::Year(v) | Token::Month(v) | Token::Date(v) | Token::Weekday(v) | Token::Clock(v) => {
                format!("time '{}'", v)
            }
            Token::Duration(v) => format!("duration '{}'", v),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{}({})", self.kind_name(), value),
            None => f.write_str(self.kind_name()),
        }
    }
}
