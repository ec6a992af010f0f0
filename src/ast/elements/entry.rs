//! Entry: one item of an indented block

use serde::Serialize;

use super::super::traits::{AstNode, TimeScoped};
use super::command::Command;
use super::path::{FindQuery, Found, Parent, SegmentPath};
use super::segment::Segment;
use crate::diagnostics::ValidationWarning;

/// A block holds segments and commands interleaved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entry")]
pub enum Entry {
    Segment(Segment),
    Command(Command),
}

impl Entry {
    /// Split block items by kind, keeping source order within each kind
    pub fn partition(entries: impl IntoIterator<Item = Entry>) -> (Vec<Segment>, Vec<Command>) {
        let mut segments = Vec::new();
        let mut commands = Vec::new();
        for entry in entries {
            match entry {
                Entry::Segment(segment) => segments.push(segment),
                Entry::Command(command) => commands.push(command),
            }
        }
        (segments, commands)
    }
}

impl AstNode for Entry {
    fn node_type(&self) -> &'static str {
        match self {
            Entry::Segment(segment) => segment.node_type(),
            Entry::Command(command) => command.node_type(),
        }
    }

    fn display_label(&self) -> String {
        match self {
            Entry::Segment(segment) => segment.display_label(),
            Entry::Command(command) => command.display_label(),
        }
    }
}

impl TimeScoped for Entry {
    fn collect_matches<'a>(
        &'a self,
        query: &FindQuery<'_>,
        parent: Parent<'a>,
        path: &SegmentPath,
        found: &mut Vec<Found<'a>>,
    ) {
        match self {
            Entry::Segment(segment) => segment.collect_matches(query, parent, path, found),
            Entry::Command(command) => command.collect_matches(query, parent, path, found),
        }
    }

    fn try_insert(&mut self, segment: Segment) -> Result<(), Segment> {
        match self {
            Entry::Segment(inner) => inner.try_insert(segment),
            Entry::Command(command) => command.try_insert(segment),
        }
    }

    fn normalize_children(&mut self, warnings: &mut Vec<ValidationWarning>) {
        match self {
            Entry::Segment(segment) => segment.normalize_children(warnings),
            Entry::Command(command) => command.normalize_children(warnings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TimeValue;

    #[test]
    fn test_partition_keeps_order() {
        let entries = vec![
            Entry::Command(Command::new("a", "1")),
            Entry::Segment(Segment::new(TimeValue::new()).with_description("x")),
            Entry::Command(Command::new("b", "2")),
        ];
        let (segments, commands) = Entry::partition(entries);
        assert_eq!(segments.len(), 1);
        let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_node_type_delegates() {
        assert_eq!(Entry::Command(Command::new("a", "1")).node_type(), "Command");
        assert_eq!(Entry::Segment(Segment::new(TimeValue::new())).node_type(), "Segment");
    }
}
