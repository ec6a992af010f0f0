//! Addressing segments inside a document
//!
//! Segments live in ordered maps keyed by their start time, with a list per
//! key. A [`SegmentPath`] names one segment as the chain of `(key, index)`
//! steps from the document root down to it.

use serde::Serialize;
use std::fmt;

use super::document::Document;
use super::segment::Segment;
use crate::ast::TimeValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub key: TimeValue,
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentPath {
    steps: Vec<PathStep>,
}

impl SegmentPath {
    /// The empty path, addressing the document itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th segment under `key` below this one
    pub fn child(&self, key: TimeValue, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep { key, index });
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Split into the path of the enclosing node and the final step
    pub fn split_last(&self) -> Option<(SegmentPath, &PathStep)> {
        let (last, rest) = self.steps.split_last()?;
        Some((
            SegmentPath {
                steps: rest.to_vec(),
            },
            last,
        ))
    }
}

impl fmt::Display for SegmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str("/");
        }
        for step in &self.steps {
            write!(f, "/{}#{}", step.key, step.index)?;
        }
        Ok(())
    }
}

/// The direct parent of a found segment
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    Document(&'a Document),
    Segment(&'a Segment),
}

impl<'a> Parent<'a> {
    /// Fully qualified scope the parent imposes on its children
    pub fn scope(&self) -> TimeValue {
        match self {
            Parent::Document(document) => document.header.clone(),
            Parent::Segment(segment) => segment.time.start(),
        }
    }
}

/// A segment matched by a find, with its parent and address
#[derive(Debug, Clone)]
pub struct Found<'a> {
    pub segment: &'a Segment,
    pub parent: Parent<'a>,
    pub path: SegmentPath,
}

/// Search criteria: exact description, optionally restricted by ongoing state
#[derive(Debug, Clone, Copy)]
pub struct FindQuery<'q> {
    pub description: &'q str,
    pub ongoing: Option<bool>,
}

impl<'q> FindQuery<'q> {
    pub fn new(description: &'q str, ongoing: Option<bool>) -> Self {
        Self {
            description,
            ongoing,
        }
    }

    pub fn matches(&self, segment: &Segment) -> bool {
        segment.description.as_deref() == Some(self.description)
            && self.ongoing.map_or(true, |ongoing| ongoing == segment.ongoing)
    }
}
