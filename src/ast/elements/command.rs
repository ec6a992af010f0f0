//! Command element definition
//!
//! A command is a named annotation on a segment (`!name [description]`)
//! with an ordered list of options (`#name value`). Commands never hold
//! segments and never match time-scoped queries.

use serde::Serialize;
use std::fmt;

use super::super::traits::{AstNode, TimeScoped};
use super::path::{FindQuery, Found, Parent, SegmentPath};
use super::segment::Segment;
use crate::diagnostics::ValidationWarning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Second,
    Minute,
    Hour,
}

impl DurationUnit {
    pub fn name(self) -> &'static str {
        match self {
            DurationUnit::Second => "second",
            DurationUnit::Minute => "minute",
            DurationUnit::Hour => "hour",
        }
    }

    pub fn seconds(self) -> u64 {
        match self {
            DurationUnit::Second => 1,
            DurationUnit::Minute => 60,
            DurationUnit::Hour => 3600,
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word.strip_suffix('s').unwrap_or(word) {
            "second" => Some(DurationUnit::Second),
            "minute" => Some(DurationUnit::Minute),
            "hour" => Some(DurationUnit::Hour),
            _ => None,
        }
    }
}

/// An option duration: `30 minutes`, `1 hour`, or a bare unit such as `hour`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Duration {
    pub amount: Option<u64>,
    pub unit: DurationUnit,
}

impl Duration {
    pub fn new(amount: Option<u64>, unit: DurationUnit) -> Self {
        Self { amount, unit }
    }

    /// Parse the text of a duration token
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let first = words.next()?;
        let duration = match words.next() {
            Some(unit) => Duration::new(Some(first.parse().ok()?), DurationUnit::from_word(unit)?),
            None => Duration::new(None, DurationUnit::from_word(first)?),
        };
        match words.next() {
            Some(_) => None,
            None => Some(duration),
        }
    }

    /// Total length in seconds; a bare unit counts as one
    pub fn as_seconds(&self) -> u64 {
        self.amount.unwrap_or(1) * self.unit.seconds()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(1) => write!(f, "1 {}", self.unit.name()),
            Some(n) => write!(f, "{} {}s", n, self.unit.name()),
            None => f.write_str(self.unit.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum OptionValue {
    Duration(Duration),
    Text(String),
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

impl CommandOption {
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, OptionValue::Flag)
    }

    pub(crate) fn write_dtl(&self, depth: usize, out: &mut String) {
        out.push_str(&"\t".repeat(depth));
        out.push('#');
        out.push_str(&self.name);
        match &self.value {
            OptionValue::Duration(duration) => {
                out.push(' ');
                out.push_str(&duration.to_string());
            }
            OptionValue::Text(text) => {
                out.push_str(" [");
                out.push_str(text);
                out.push(']');
            }
            OptionValue::Flag => {}
        }
        out.push('\n');
    }
}

/// A named annotation attached to a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub options: Vec<CommandOption>,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// First option with the given name
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|option| option.name == name)
    }

    pub(crate) fn write_dtl(&self, depth: usize, out: &mut String) {
        out.push_str(&"\t".repeat(depth));
        out.push('!');
        out.push_str(&self.name);
        out.push_str(" [");
        out.push_str(&self.description);
        out.push_str("]\n");
        for option in &self.options {
            option.write_dtl(depth + 1, out);
        }
    }
}

impl AstNode for Command {
    fn node_type(&self) -> &'static str {
        "Command"
    }
    fn display_label(&self) -> String {
        format!("!{}", self.name)
    }
}

impl TimeScoped for Command {
    fn collect_matches<'a>(
        &'a self,
        _query: &FindQuery<'_>,
        _parent: Parent<'a>,
        _path: &SegmentPath,
        _found: &mut Vec<Found<'a>>,
    ) {
    }

    fn try_insert(&mut self, segment: Segment) -> Result<(), Segment> {
        Err(segment)
    }

    fn normalize_children(&mut self, _warnings: &mut Vec<ValidationWarning>) {}
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Command('!{}', {} options)",
            self.name,
            self.options.len()
        )
    }
}
