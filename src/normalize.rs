//! Tree normalization
//!
//! Runs once per parsed document, bottom-up over each sibling group:
//!
//! 1. qualify every sibling's time against the enclosing scope and re-key,
//! 2. keep tagged siblings (description, commands, ongoing, period) as they are,
//! 3. melt scaffold siblings sharing a key into one accumulator holding all of
//!    their children, dropped if it ends up empty,
//! 4. recurse into every survivor with its own time as the new scope.
//!
//! The ordered map keeps siblings sorted by time and source order within a
//! key. Running the pass on its own output leaves the tree unchanged.

use crate::ast::{Segment, Segments, TimeScoped, TimeValue};
use crate::diagnostics::{ValidationWarning, WarningKind};

pub fn normalize_segments(
    segments: Segments,
    scope: &TimeValue,
    warnings: &mut Vec<ValidationWarning>,
) -> Segments {
    let mut groups = Segments::new();
    for mut segment in segments.into_values().flatten() {
        segment.time = segment.time.inherit(scope);
        check_segment(&segment, scope, warnings);
        groups.entry(segment.time.start()).or_default().push(segment);
    }

    let mut normalized = Segments::new();
    for (key, group) in groups {
        let (mut survivors, scaffolds): (Vec<Segment>, Vec<Segment>) =
            group.into_iter().partition(|segment| !segment.is_scaffold());

        if !scaffolds.is_empty() {
            let mut accumulator = Segment::new(key.clone());
            for scaffold in scaffolds {
                for child in scaffold.children.into_values().flatten() {
                    accumulator
                        .children
                        .entry(child.time.start())
                        .or_default()
                        .push(child);
                }
            }
            if !accumulator.children.is_empty() {
                survivors.push(accumulator);
            }
        }

        for segment in &mut survivors {
            segment.normalize_children(warnings);
        }
        if !survivors.is_empty() {
            normalized.insert(key, survivors);
        }
    }
    normalized
}

fn check_segment(segment: &Segment, scope: &TimeValue, warnings: &mut Vec<ValidationWarning>) {
    let mut warn = |kind| {
        warnings.push(ValidationWarning::new(
            kind,
            segment.time.clone(),
            segment.description.clone(),
        ))
    };
    if segment.time.conflicts() {
        warn(WarningKind::WeekdayAndDate);
    }
    if !scope.contains(&segment.time) {
        warn(WarningKind::OutsideScope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TimeKind;

    fn at(explicit: &[(TimeKind, &str)]) -> TimeValue {
        TimeValue::combine(explicit.iter().copied(), None).unwrap()
    }

    fn scaffolds_for_two_days() -> Segments {
        let year = at(&[(TimeKind::Year, "2024")]);
        let june = at(&[(TimeKind::Month, "June")]);
        let first = at(&[(TimeKind::DayOfMonth, "1st")]);
        let second = at(&[(TimeKind::DayOfMonth, "2nd")]);

        let mut segments = Segments::new();
        for (day, description) in [(second, "B"), (first, "A")] {
            let tree = Segment::new(year.clone()).with_child(
                Segment::new(june.clone()).with_child(Segment::new(day).with_description(description)),
            );
            segments.entry(year.clone()).or_default().push(tree);
        }
        segments
    }

    #[test]
    fn test_scaffolds_merge_and_sort() {
        let mut warnings = Vec::new();
        let segments = normalize_segments(scaffolds_for_two_days(), &TimeValue::new(), &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(segments.len(), 1);
        let year = &segments.values().next().unwrap()[..];
        assert_eq!(year.len(), 1);
        let june: Vec<_> = year[0].child_segments().collect();
        assert_eq!(june.len(), 1);

        let days: Vec<_> = june[0]
            .child_segments()
            .map(|s| s.description.clone().unwrap())
            .collect();
        assert_eq!(days, vec!["A", "B"]);
        let first = june[0].child_segments().next().unwrap();
        assert_eq!(first.time.get(TimeKind::Year), Some(2024));
        assert_eq!(first.time.get(TimeKind::Month), Some(6));
    }

    #[test]
    fn test_tagged_siblings_are_kept_apart() {
        let nine = at(&[(TimeKind::ClockTime, "9:00")]);
        let mut segments = Segments::new();
        segments.entry(nine.clone()).or_default().extend([
            Segment::new(nine.clone()).with_description("one"),
            Segment::new(nine.clone()).ongoing(),
            Segment::new(nine.clone()),
        ]);

        let mut warnings = Vec::new();
        let segments = normalize_segments(segments, &TimeValue::new(), &mut warnings);
        // the childless scaffold disappears
        assert_eq!(segments[&nine].len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let mut warnings = Vec::new();
        let once = normalize_segments(scaffolds_for_two_days(), &TimeValue::new(), &mut warnings);
        let twice = normalize_segments(once.clone(), &TimeValue::new(), &mut warnings);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_conflict_and_scope_warnings() {
        let scope = at(&[(TimeKind::Month, "June")]);
        let mut segments = Segments::new();
        let clash = at(&[(TimeKind::Weekday, "Monday"), (TimeKind::DayOfMonth, "3rd")]);
        let july = at(&[(TimeKind::Month, "July")]);
        segments.entry(clash.clone()).or_default().push(Segment::new(clash).with_description("Gym"));
        segments.entry(july.clone()).or_default().push(Segment::new(july).with_description("Trip"));

        let mut warnings = Vec::new();
        let segments = normalize_segments(segments, &scope, &mut warnings);

        let kinds: Vec<_> = warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::WeekdayAndDate, WarningKind::OutsideScope]);
        assert_eq!(warnings[0].description.as_deref(), Some("Gym"));
        // nothing is dropped
        assert_eq!(segments.values().map(Vec::len).sum::<usize>(), 2);
    }
}
