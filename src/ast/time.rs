//! Time model: component kinds, their grammars, and partially specified values

pub mod kind;
pub mod value;

pub use kind::{ordinal, TimeKind, MONTHS, WEEKDAYS};
pub use value::{Period, TimeValue};
