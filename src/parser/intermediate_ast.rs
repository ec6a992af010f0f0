//! Intermediate AST produced by the grammar
//!
//! Time literals are kept as raw component text with spans. They only become
//! [`TimeValue`](crate::ast::TimeValue)s in the conversion pass, which knows
//! the enclosing scope of every literal.

use std::ops::Range;

use crate::ast::{CommandOption, TimeKind};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TimeComponent {
    pub(crate) kind: TimeKind,
    pub(crate) text: String,
    pub(crate) span: Range<usize>,
}

/// Components of one literal, in source order
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TimeLiteral {
    pub(crate) components: Vec<TimeComponent>,
}

impl TimeLiteral {
    pub(crate) fn span(&self) -> Range<usize> {
        let start = self.components.first().map(|c| c.span.start).unwrap_or(0);
        let end = self.components.last().map(|c| c.span.end).unwrap_or(start);
        start..end
    }

    pub(crate) fn kinds(&self) -> Vec<TimeKind> {
        self.components.iter().map(|c| c.kind).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SegmentWithSpans {
    /// Span of the `@` marker
    pub(crate) marker: Range<usize>,
    pub(crate) start: TimeLiteral,
    /// The `-` marker and the literal after it
    pub(crate) end: Option<(Range<usize>, TimeLiteral)>,
    pub(crate) ongoing: bool,
    pub(crate) description: Option<String>,
    pub(crate) block: Vec<EntryWithSpans>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CommandWithSpans {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) options: Vec<CommandOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EntryWithSpans {
    Segment(SegmentWithSpans),
    Command(CommandWithSpans),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DocumentWithSpans {
    pub(crate) header: Option<TimeLiteral>,
    pub(crate) segments: Vec<SegmentWithSpans>,
}
