//! Segment element definition
//!
//! A segment is one `@time` line plus everything indented beneath it: its
//! commands and its child segments. Children are kept in a [`Segments`] map
//! ordered by time, with source order preserved among children sharing a key.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::super::traits::{AstNode, TimeScoped};
use super::command::Command;
use super::path::{FindQuery, Found, Parent, SegmentPath};
use crate::ast::TimeValue;
use crate::diagnostics::ValidationWarning;
use crate::normalize::normalize_segments;

/// Ordered multimap of segments keyed by start time
pub type Segments = BTreeMap<TimeValue, Vec<Segment>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub time: TimeValue,
    pub description: Option<String>,
    pub ongoing: bool,
    pub commands: Vec<Command>,
    #[serde(serialize_with = "serialize_segments")]
    pub children: Segments,
}

impl Segment {
    pub fn new(time: TimeValue) -> Self {
        Self {
            time,
            description: None,
            ongoing: false,
            commands: Vec::new(),
            children: Segments::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn ongoing(mut self) -> Self {
        self.ongoing = true;
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Append a child under its own start key, without descending
    pub fn with_child(mut self, child: Segment) -> Self {
        push_segment(&mut self.children, child);
        self
    }

    /// No description, no commands, not ongoing and not a period
    pub fn is_scaffold(&self) -> bool {
        self.description.is_none() && self.commands.is_empty() && !self.ongoing && !self.time.is_period()
    }

    /// Children in sorted order
    pub fn child_segments(&self) -> impl Iterator<Item = &Segment> {
        self.children.values().flatten()
    }

    pub fn child_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Append this segment in canonical form, rendered against `scope`
    pub(crate) fn write_dtl(&self, depth: usize, scope: &TimeValue, out: &mut String) {
        out.push_str(&"\t".repeat(depth));
        out.push('@');
        out.push_str(&self.time.format(scope));
        if self.ongoing && !self.time.is_open() {
            out.push_str("...");
        }
        if let Some(description) = &self.description {
            out.push_str(" [");
            out.push_str(description);
            out.push(']');
        }
        out.push('\n');

        for command in &self.commands {
            command.write_dtl(depth + 1, out);
        }
        let child_scope = self.time.start();
        for child in self.child_segments() {
            child.write_dtl(depth + 1, &child_scope, out);
        }
    }
}

/// Push `segment` under its start key
pub(crate) fn push_segment(segments: &mut Segments, segment: Segment) {
    segments.entry(segment.time.start()).or_default().push(segment);
}

/// Insert at the deepest level whose segment strictly contains `segment`
///
/// Candidates are tried in sorted order and the first acceptor wins. With no
/// acceptor the segment joins `segments` itself.
pub(crate) fn insert_into(segments: &mut Segments, segment: Segment) {
    let mut pending = segment;
    for child in segments.values_mut().flatten() {
        match child.try_insert(pending) {
            Ok(()) => return,
            Err(rejected) => pending = rejected,
        }
    }
    push_segment(segments, pending);
}

/// Collect matches below a container, in sorted order
pub(crate) fn collect_in<'a>(
    segments: &'a Segments,
    query: &FindQuery<'_>,
    parent: Parent<'a>,
    path: &SegmentPath,
    found: &mut Vec<Found<'a>>,
) {
    for (key, list) in segments {
        for (index, segment) in list.iter().enumerate() {
            segment.collect_matches(query, parent, &path.child(key.clone(), index), found);
        }
    }
}

fn serialize_segments<S: Serializer>(segments: &Segments, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(segments.values().flatten())
}

impl AstNode for Segment {
    fn node_type(&self) -> &'static str {
        "Segment"
    }

    fn display_label(&self) -> String {
        let mut label = format!("@{}", self.time);
        if self.ongoing && !self.time.is_open() {
            label.push_str("...");
        }
        if let Some(description) = &self.description {
            label.push_str(&format!(" [{}]", description));
        }
        label
    }
}

impl TimeScoped for Segment {
    fn collect_matches<'a>(
        &'a self,
        query: &FindQuery<'_>,
        parent: Parent<'a>,
        path: &SegmentPath,
        found: &mut Vec<Found<'a>>,
    ) {
        if query.matches(self) {
            found.push(Found {
                segment: self,
                parent,
                path: path.clone(),
            });
        }
        for command in &self.commands {
            command.collect_matches(query, Parent::Segment(self), path, found);
        }
        collect_in(&self.children, query, Parent::Segment(self), path, found);
    }

    fn try_insert(&mut self, segment: Segment) -> Result<(), Segment> {
        if self.time == segment.time || !self.time.contains(&segment.time) {
            return Err(segment);
        }
        insert_into(&mut self.children, segment);
        Ok(())
    }

    fn normalize_children(&mut self, warnings: &mut Vec<ValidationWarning>) {
        let children = std::mem::take(&mut self.children);
        self.children = normalize_segments(children, &self.time.start(), warnings);
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment('{}', {} commands, {} children)",
            self.display_label(),
            self.commands.len(),
            self.child_count()
        )
    }
}
