//! Document element definition
//!
//! The document is the root of the tree: an optional `for <time>:` header
//! that scopes every segment, plus the top-level segment map. All editing
//! operations used by the command-line tool live here.

use serde::{Serialize, Serializer};
use std::fmt;

use super::super::traits::{AstNode, TimeScoped};
use super::path::{FindQuery, Found, Parent, SegmentPath};
use super::segment::{collect_in, insert_into, push_segment, Segment, Segments};
use crate::ast::TimeValue;
use crate::diagnostics::ValidationWarning;
use crate::normalize::normalize_segments;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub header: TimeValue,
    #[serde(serialize_with = "serialize_segments")]
    pub segments: Segments,
}

fn serialize_segments<S: Serializer>(segments: &Segments, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(segments.values().flatten())
}

impl Document {
    pub fn new(header: TimeValue) -> Self {
        Self {
            header,
            segments: Segments::new(),
        }
    }

    /// Append a top-level segment under its own start key
    pub fn with_segment(mut self, segment: Segment) -> Self {
        push_segment(&mut self.segments, segment);
        self
    }

    /// Top-level segments in sorted order
    pub fn iter_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values().flatten()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }

    /// Canonical text form
    pub fn format(&self) -> String {
        let mut out = String::new();
        if !self.header.is_empty() {
            out.push_str("for ");
            out.push_str(&self.header.to_string());
            out.push_str(":\n\n");
        }
        for segment in self.iter_segments() {
            segment.write_dtl(0, &self.header, &mut out);
        }
        out
    }

    /// Every segment with this exact description, depth first in sorted order
    ///
    /// `ongoing` restricts matches to ongoing (`Some(true)`) or static
    /// (`Some(false)`) segments; `None` matches both.
    pub fn find(&self, description: &str, ongoing: Option<bool>) -> Vec<&Segment> {
        self.find_with_parent(description, ongoing)
            .into_iter()
            .map(|found| found.segment)
            .collect()
    }

    pub fn find_with_parent(&self, description: &str, ongoing: Option<bool>) -> Vec<Found<'_>> {
        let query = FindQuery::new(description, ongoing);
        let mut found = Vec::new();
        collect_in(
            &self.segments,
            &query,
            Parent::Document(self),
            &SegmentPath::root(),
            &mut found,
        );
        found
    }

    /// Insert at the deepest segment strictly containing the new one
    ///
    /// Returns false, leaving the document untouched, when the header does
    /// not contain the segment's time as given. A time that leaves a header
    /// component unspecified is not contained.
    pub fn insert_segment(&mut self, segment: Segment) -> bool {
        if !self.header.contains(&segment.time) {
            log::debug!("rejected {} outside of document scope {}", segment.time, self.header);
            return false;
        }
        insert_into(&mut self.segments, segment);
        true
    }

    pub fn create_entry(&mut self, time: TimeValue, description: impl Into<String>, ongoing: bool) -> bool {
        let mut segment = Segment::new(time).with_description(description);
        segment.ongoing = ongoing;
        self.insert_segment(segment)
    }

    /// Close the segment at `path` as a period ending at `end`
    ///
    /// The segment is removed and re-inserted in the same parent at its old
    /// position among siblings sharing its key, which keeps its children and
    /// commands. Returns false if `path` addresses nothing.
    pub fn end_entry(&mut self, path: &SegmentPath, end: TimeValue) -> bool {
        let Some((parent_path, step)) = path.split_last() else {
            return false;
        };
        let scope = match self.get(&parent_path) {
            Some(parent) => parent.time.start(),
            None => self.header.clone(),
        };
        let Some(mut segment) = self.remove_segment(path) else {
            return false;
        };

        segment.time = segment.time.with_period_end(end.inherit(&scope));
        segment.ongoing = false;
        match self.children_at_mut(&parent_path) {
            Some(siblings) => {
                let list = siblings.entry(segment.time.start()).or_default();
                list.insert(step.index.min(list.len()), segment);
                true
            }
            None => false,
        }
    }

    /// Detach and return the segment at `path`
    pub fn remove_segment(&mut self, path: &SegmentPath) -> Option<Segment> {
        let (parent_path, step) = path.split_last()?;
        let siblings = self.children_at_mut(&parent_path)?;
        let list = siblings.get_mut(&step.key)?;
        if step.index >= list.len() {
            return None;
        }
        let segment = list.remove(step.index);
        if list.is_empty() {
            siblings.remove(&step.key);
        }
        Some(segment)
    }

    /// The segment at `path`; the root path addresses no segment
    pub fn get(&self, path: &SegmentPath) -> Option<&Segment> {
        let (first, rest) = path.steps().split_first()?;
        let mut current = self.segments.get(&first.key)?.get(first.index)?;
        for step in rest {
            current = current.children.get(&step.key)?.get(step.index)?;
        }
        Some(current)
    }

    /// The child map of the node at `path`, this document's own for the root
    pub fn children_at_mut(&mut self, path: &SegmentPath) -> Option<&mut Segments> {
        let mut current = &mut self.segments;
        for step in path.steps() {
            current = &mut current.get_mut(&step.key)?.get_mut(step.index)?.children;
        }
        Some(current)
    }

    /// Merge scaffolds, qualify times and report inconsistencies
    pub fn normalize(&mut self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let segments = std::mem::take(&mut self.segments);
        self.segments = normalize_segments(segments, &self.header, &mut warnings);
        log::debug!(
            "normalized document: {} top-level segments, {} warnings",
            self.segment_count(),
            warnings.len()
        );
        warnings
    }
}

impl AstNode for Document {
    fn node_type(&self) -> &'static str {
        "Document"
    }

    fn display_label(&self) -> String {
        if self.header.is_empty() {
            "document".to_string()
        } else {
            format!("for {}", self.header)
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document('{}', {} segments)",
            self.display_label(),
            self.segment_count()
        )
    }
}
