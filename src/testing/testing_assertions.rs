//! Fluent assertion API for document trees

use crate::ast::{Command, Document, OptionValue, Segment};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize(segments: &[&Segment]) -> String {
    segments
        .iter()
        .map(|segment| segment.time.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the rendered header scope; `""` for no header
    pub fn header(self, expected: &str) -> Self {
        let actual = self.doc.header.to_string();
        assert_eq!(actual, expected, "document header: expected '{}', found '{}'", expected, actual);
        self
    }

    /// Assert the number of top-level segments
    pub fn segment_count(self, expected: usize) -> Self {
        let segments: Vec<_> = self.doc.iter_segments().collect();
        assert_eq!(
            segments.len(),
            expected,
            "Expected {} segments, found {}: [{}]",
            expected,
            segments.len(),
            summarize(&segments)
        );
        self
    }

    /// Assert on a top-level segment, by index in sorted order
    pub fn segment<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SegmentAssertion<'a>),
    {
        let segments: Vec<_> = self.doc.iter_segments().collect();
        assert!(
            index < segments.len(),
            "Segment index {} out of bounds (document has {} segments)",
            index,
            segments.len()
        );
        assertion(SegmentAssertion {
            segment: segments[index],
            context: format!("segments[{}]", index),
        });
        self
    }
}

// ============================================================================
// Segment Assertions
// ============================================================================

pub struct SegmentAssertion<'a> {
    segment: &'a Segment,
    context: String,
}

impl<'a> SegmentAssertion<'a> {
    /// Assert the fully qualified time, rendered in full
    pub fn time(self, expected: &str) -> Self {
        let actual = self.segment.time.to_string();
        assert_eq!(
            actual, expected,
            "{}: expected time '{}', found '{}'",
            self.context, expected, actual
        );
        self
    }

    pub fn description(self, expected: &str) -> Self {
        assert_eq!(
            self.segment.description.as_deref(),
            Some(expected),
            "{}: description mismatch",
            self.context
        );
        self
    }

    pub fn no_description(self) -> Self {
        assert!(
            self.segment.description.is_none(),
            "{}: expected no description, found {:?}",
            self.context,
            self.segment.description
        );
        self
    }

    pub fn ongoing(self, expected: bool) -> Self {
        assert_eq!(
            self.segment.ongoing, expected,
            "{}: expected ongoing={}",
            self.context, expected
        );
        self
    }

    /// Assert the period end, rendered in full; `None` for no closed period
    pub fn period_end(self, expected: Option<&str>) -> Self {
        let actual = self.segment.time.period_end().map(|end| end.to_string());
        assert_eq!(
            actual.as_deref(),
            expected,
            "{}: period end mismatch",
            self.context
        );
        self
    }

    pub fn command_count(self, expected: usize) -> Self {
        let actual = self.segment.commands.len();
        assert_eq!(
            actual, expected,
            "{}: expected {} commands, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn command<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(CommandAssertion<'a>),
    {
        let commands = &self.segment.commands;
        assert!(
            index < commands.len(),
            "{}: command index {} out of bounds ({} commands)",
            self.context,
            index,
            commands.len()
        );
        assertion(CommandAssertion {
            command: &commands[index],
            context: format!("{}:commands[{}]", self.context, index),
        });
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let children: Vec<_> = self.segment.child_segments().collect();
        assert_eq!(
            children.len(),
            expected,
            "{}: expected {} children, found {}: [{}]",
            self.context,
            expected,
            children.len(),
            summarize(&children)
        );
        self
    }

    /// Assert on a child segment, by index in sorted order
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SegmentAssertion<'a>),
    {
        let children: Vec<_> = self.segment.child_segments().collect();
        assert!(
            index < children.len(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(SegmentAssertion {
            segment: children[index],
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Command Assertions
// ============================================================================

pub struct CommandAssertion<'a> {
    command: &'a Command,
    context: String,
}

impl<'a> CommandAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.command.name, expected, "{}: command name mismatch", self.context);
        self
    }

    pub fn description(self, expected: &str) -> Self {
        assert_eq!(
            self.command.description, expected,
            "{}: command description mismatch",
            self.context
        );
        self
    }

    pub fn option_count(self, expected: usize) -> Self {
        assert_eq!(
            self.command.options.len(),
            expected,
            "{}: option count mismatch",
            self.context
        );
        self
    }

    /// Assert the value of the first option with this name
    pub fn option(self, name: &str, expected: OptionValue) -> Self {
        match self.command.option(name) {
            Some(option) => assert_eq!(
                option.value, expected,
                "{}: option '#{}' value mismatch",
                self.context, name
            ),
            None => panic!("{}: no option '#{}'", self.context, name),
        }
        self
    }
}
