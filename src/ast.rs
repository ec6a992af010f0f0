//! AST for dtl documents
//!
//! A [`Document`] owns an ordered map of top-level [`Segment`]s keyed by
//! their time. Every segment exclusively owns its children the same way, so
//! the tree is acyclic and every node has one parent. Edits replace whole
//! subtrees (remove, then insert in the parent map) instead of mutating a
//! shared node.

pub mod elements;
pub mod position;
pub mod time;
pub mod traits;

pub use elements::{
    Command, CommandOption, Document, Duration, DurationUnit, Entry, FindQuery, Found,
    OptionValue, Parent, PathStep, Segment, SegmentPath, Segments,
};
pub use position::{Position, SourceLocation};
pub use time::{Period, TimeKind, TimeValue};
pub use traits::{AstNode, TimeScoped};
