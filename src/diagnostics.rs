//! Validation warnings
//!
//! Warnings flag malformed but usable input. They never abort parsing; the
//! offending value stays in the tree exactly as written.

use serde::Serialize;
use std::fmt;

use crate::ast::TimeValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// The explicit components of a literal do not increase in rank
    OutOfOrder,
    /// Weekday and day of month are both present
    WeekdayAndDate,
    /// A segment contradicts a component fixed by its enclosing scope
    OutsideScope,
    /// A segment is marked ongoing and also has a period end
    OngoingPeriod,
    /// A period ends before it starts
    EndBeforeStart,
}

impl WarningKind {
    pub fn message(self) -> &'static str {
        match self {
            WarningKind::OutOfOrder => "segment time not in order",
            WarningKind::WeekdayAndDate => "segment time contains both weekday and date",
            WarningKind::OutsideScope => "segment time lies outside its enclosing scope",
            WarningKind::OngoingPeriod => "segment is ongoing but already has a period end",
            WarningKind::EndBeforeStart => "segment period ends before it starts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub kind: WarningKind,
    pub time: TimeValue,
    pub description: Option<String>,
}

impl ValidationWarning {
    pub fn new(kind: WarningKind, time: TimeValue, description: Option<String>) -> Self {
        Self {
            kind,
            time,
            description,
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: @{}", self.kind.message(), self.time)?;
        if let Some(description) = &self.description {
            write!(f, " [{}]", description)?;
        }
        Ok(())
    }
}
