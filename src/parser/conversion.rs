//! Conversion from the intermediate AST to the document tree
//!
//! Every literal is resolved against the scope of the node it sits in, and
//! that scope is handed down explicitly: a segment's time is its literal
//! combined with the parent's time, and becomes the scope of its block.

use super::intermediate_ast::{
    CommandWithSpans, DocumentWithSpans, EntryWithSpans, SegmentWithSpans, TimeComponent,
    TimeLiteral,
};
use crate::ast::elements::segment::push_segment;
use crate::ast::{Command, Document, Entry, Segment, SourceLocation, TimeKind, TimeValue};
use crate::diagnostics::{ValidationWarning, WarningKind};
use crate::error::ParseError;

pub(crate) struct Converter<'s> {
    location: SourceLocation<'s>,
    warnings: Vec<ValidationWarning>,
}

impl<'s> Converter<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self {
            location: SourceLocation::new(source),
            warnings: Vec::new(),
        }
    }

    /// Build and normalize the document, returning it with every warning
    pub(crate) fn convert(
        mut self,
        raw: DocumentWithSpans,
    ) -> Result<(Document, Vec<ValidationWarning>), ParseError> {
        let header = match &raw.header {
            Some(literal) => self.resolve(&literal.components, None)?,
            None => TimeValue::new(),
        };

        let mut document = Document::new(header);
        for segment in raw.segments {
            let segment = self.segment(segment, &document.header)?;
            push_segment(&mut document.segments, segment);
        }

        let mut warnings = self.warnings;
        warnings.extend(document.normalize());
        Ok((document, warnings))
    }

    fn segment(&mut self, raw: SegmentWithSpans, scope: &TimeValue) -> Result<Segment, ParseError> {
        let (start_components, shorthand) = self.split_shorthand(&raw.start)?;
        let start = self.resolve(&start_components, Some(scope))?;
        self.check_order(&raw.start, &start, &raw.description);

        let time = match (&raw.end, shorthand) {
            (Some((marker, _)), Some(_)) => {
                return Err(ParseError::InvalidPeriod {
                    position: self.location.byte_to_position(marker.start),
                })
            }
            (Some((_, literal)), None) => {
                let (end_components, nested) = self.split_shorthand(literal)?;
                if let Some(component) = nested {
                    return Err(ParseError::InvalidPeriod {
                        position: self.location.byte_to_position(component.span.start),
                    });
                }
                let end = self.resolve(&end_components, Some(scope))?;
                self.check_order(literal, &end, &raw.description);
                start.with_period_end(end)
            }
            (None, Some(end_clock)) => {
                let end = self.resolve(std::slice::from_ref(&end_clock), Some(&start))?;
                start.with_period_end(end)
            }
            (None, None) => start,
        };

        if raw.ongoing && time.is_period() {
            self.warn(WarningKind::OngoingPeriod, &time, &raw.description);
        }
        if time.ends_before_start() {
            self.warn(WarningKind::EndBeforeStart, &time, &raw.description);
        }

        let child_scope = time.start();
        let mut entries = Vec::with_capacity(raw.block.len());
        for entry in raw.block {
            entries.push(match entry {
                EntryWithSpans::Segment(child) => Entry::Segment(self.segment(child, &child_scope)?),
                EntryWithSpans::Command(command) => Entry::Command(convert_command(command)),
            });
        }
        let (children, commands) = Entry::partition(entries);

        let mut segment = Segment::new(time);
        segment.description = raw.description;
        segment.ongoing = raw.ongoing;
        segment.commands = commands;
        for child in children {
            push_segment(&mut segment.children, child);
        }
        Ok(segment)
    }

    /// Separate the `-H:MM` shorthand end from a clock component
    ///
    /// Returns the literal's components with the start clock only, plus the
    /// end clock as its own component. A literal may carry one shorthand.
    fn split_shorthand(
        &self,
        literal: &TimeLiteral,
    ) -> Result<(Vec<TimeComponent>, Option<TimeComponent>), ParseError> {
        let mut components = Vec::with_capacity(literal.components.len());
        let mut shorthand: Option<TimeComponent> = None;

        for component in &literal.components {
            let split = match component.kind {
                TimeKind::ClockTime => component.text.split_once('-'),
                _ => None,
            };
            let Some((start, end)) = split else {
                components.push(component.clone());
                continue;
            };
            if shorthand.is_some() {
                return Err(ParseError::InvalidPeriod {
                    position: self.location.byte_to_position(component.span.start),
                });
            }
            let end_offset = component.span.start + start.len() + 1;
            components.push(TimeComponent {
                kind: TimeKind::ClockTime,
                text: start.to_string(),
                span: component.span.start..end_offset - 1,
            });
            shorthand = Some(TimeComponent {
                kind: TimeKind::ClockTime,
                text: end.to_string(),
                span: end_offset..component.span.end,
            });
        }
        Ok((components, shorthand))
    }

    /// Combine explicit components onto an optional parent
    fn resolve(
        &self,
        components: &[TimeComponent],
        parent: Option<&TimeValue>,
    ) -> Result<TimeValue, ParseError> {
        for component in components {
            component
                .kind
                .parse_value(&component.text)
                .map_err(|source| ParseError::InvalidTime {
                    source,
                    position: self.location.byte_to_position(component.span.start),
                })?;
        }
        let explicit = components.iter().map(|c| (c.kind, c.text.as_str()));
        TimeValue::combine(explicit, parent).map_err(|source| ParseError::InvalidTime {
            source,
            position: self.location.byte_to_position(
                components.first().map(|c| c.span.start).unwrap_or(0),
            ),
        })
    }

    fn check_order(&mut self, literal: &TimeLiteral, time: &TimeValue, description: &Option<String>) {
        if !TimeValue::is_rank_increasing(&literal.kinds()) {
            self.warn(WarningKind::OutOfOrder, time, description);
        }
    }

    fn warn(&mut self, kind: WarningKind, time: &TimeValue, description: &Option<String>) {
        self.warnings
            .push(ValidationWarning::new(kind, time.clone(), description.clone()));
    }
}

fn convert_command(raw: CommandWithSpans) -> Command {
    let mut command = Command::new(raw.name, raw.description);
    command.options = raw.options;
    command
}
