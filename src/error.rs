//! Error types for lexing, parsing and time literals

use thiserror::Error;

use crate::ast::Position;

/// A time component whose text does not match its grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("invalid year `{0}`: expected four digits")]
    InvalidYear(String),

    #[error("invalid month `{0}`")]
    InvalidMonth(String),

    #[error("invalid day of month `{0}`")]
    InvalidDay(String),

    #[error("invalid weekday `{0}`")]
    InvalidWeekday(String),

    #[error("invalid clock time `{0}`: expected H:MM")]
    InvalidClock(String),
}

/// Errors that abort parsing of a whole document
///
/// There is no partial document: later structure depends on the production
/// that failed, so the first error is reported and parsing stops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character {found:?} at {position}")]
    UnexpectedCharacter { found: char, position: Position },

    #[error("unexpected {found} at {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        position: Position,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("segment at {position} has more than one period end")]
    InvalidPeriod { position: Position },

    #[error("{source} at {position}")]
    InvalidTime {
        #[source]
        source: TimeError,
        position: Position,
    },
}

impl ParseError {
    /// Source position of the error, when it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::InvalidPeriod { position }
            | ParseError::InvalidTime { position, .. } => Some(*position),
            ParseError::UnexpectedEnd { .. } => None,
        }
    }
}
