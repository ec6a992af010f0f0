//! AST traits - Common interfaces for uniform node access
//!
//! Segments and commands sit side by side under a segment, but only segments
//! take part in time-scoped walks. [`TimeScoped`] is implemented for both so a
//! walk can treat every node alike; the command implementations are explicit
//! no-ops.

use super::elements::{FindQuery, Found, Parent, Segment, SegmentPath};
use crate::diagnostics::ValidationWarning;

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
}

/// Tree operations that depend on a node's time scope
pub trait TimeScoped {
    /// Push every node under (and including) `self` that matches `query`
    ///
    /// `path` is the address of `self`, `parent` its direct parent.
    fn collect_matches<'a>(
        &'a self,
        query: &FindQuery<'_>,
        parent: Parent<'a>,
        path: &SegmentPath,
        found: &mut Vec<Found<'a>>,
    );

    /// Take ownership of `segment` if its time falls strictly inside this node
    ///
    /// A rejected segment is handed back unchanged.
    fn try_insert(&mut self, segment: Segment) -> Result<(), Segment>;

    /// Normalize everything below this node against its own scope
    fn normalize_children(&mut self, warnings: &mut Vec<ValidationWarning>);
}
