use crate::ast::{Duration, DurationUnit, OptionValue, Position, TimeKind};
use crate::diagnostics::WarningKind;
use crate::error::{ParseError, TimeError};
use crate::parser::{parse, parse_document};
use crate::testing::assert_doc;

#[test]
fn test_nested_scaffolds() {
    let source = "@2024\n\t@June\n\t\t@1st [Standup]\n";
    let doc = parse(source).expect("Failed to parse");

    assert_doc(&doc).segment_count(1).segment(0, |year| {
        year.time("2024").no_description().child_count(1).child(0, |june| {
            june.time("2024 June").child_count(1).child(0, |day| {
                day.time("2024 June 1st")
                    .description("Standup")
                    .ongoing(false)
                    .period_end(None);
            });
        });
    });
    assert_eq!(doc.format(), source);
}

#[test]
fn test_header_scopes_segments() {
    let source = "for 2024 June:\n\n@1st [Kickoff]\n";
    let doc = parse(source).unwrap();

    assert_doc(&doc)
        .header("2024 June")
        .segment(0, |day| {
            day.time("2024 June 1st").description("Kickoff");
        });
    assert_eq!(doc.format(), source);
}

#[test]
fn test_commands_and_options() {
    let source = "@09:00 [Sync]\n\t!note [Daily]\n\t\t#length 15 minutes\n\t\t#room [B2]\n\t\t#billable\n";
    let doc = parse(source).unwrap();

    assert_doc(&doc).segment(0, |segment| {
        segment.command_count(1).command(0, |command| {
            command
                .name("note")
                .description("Daily")
                .option_count(3)
                .option(
                    "length",
                    OptionValue::Duration(Duration::new(Some(15), DurationUnit::Minute)),
                )
                .option("room", OptionValue::Text("B2".into()))
                .option("billable", OptionValue::Flag);
        });
    });
    assert_eq!(doc.format(), source);
}

#[test]
fn test_commands_render_before_children() {
    let source = "@June\n\t@1st [Talk]\n\t!tag [conference]\n";
    let doc = parse(source).unwrap();
    assert_eq!(doc.format(), "@June\n\t!tag [conference]\n\t@1st [Talk]\n");
}

#[test]
fn test_clock_shorthand_period() {
    let source = "@2024 June 1st\n\t@09:00-10:30 [Standup]\n";
    let doc = parse(source).unwrap();

    assert_doc(&doc).segment(0, |day| {
        day.child(0, |standup| {
            standup
                .time("2024 June 1st 09:00-10:30")
                .period_end(Some("2024 June 1st 10:30"));
        });
    });
    let standup = &doc.find("Standup", None)[0];
    assert_eq!(standup.time.interval_minutes(), Some(90));
    assert_eq!(doc.format(), source);
}

#[test]
fn test_explicit_period_end_uses_parent_scope() {
    let source = "@2024\n\t@June 1st-3rd [Trip]\n";
    let doc = parse(source).unwrap();

    let trip = &doc.find("Trip", None)[0];
    let end = trip.time.period_end().unwrap();
    assert_eq!(end.get(TimeKind::Year), Some(2024));
    assert_eq!(end.get(TimeKind::Month), None);
    assert_eq!(end.get(TimeKind::DayOfMonth), Some(3));
    assert_eq!(doc.format(), source);
}

#[test]
fn test_ongoing_segment() {
    let source = "@2024 June 1st\n\t@14:00... [Deep work]\n";
    let doc = parse(source).unwrap();
    assert_eq!(doc.find("Deep work", Some(true)).len(), 1);
    assert_eq!(doc.format(), source);
}

#[test]
fn test_siblings_sorted_by_time() {
    let doc = parse("@June\n\t@3rd [C]\n\t@1st [A]\n\t@2nd [B]\n").unwrap();
    assert_eq!(doc.format(), "@June\n\t@1st [A]\n\t@2nd [B]\n\t@3rd [C]\n");
}

#[test]
fn test_blank_lines_and_missing_newline() {
    let doc = parse("\n\n@June [Summer]\n\n\n\t@1st [Solstice]").unwrap();
    assert_eq!(doc.format(), "@June [Summer]\n\t@1st [Solstice]\n");
}

#[test]
fn test_empty_document() {
    let doc = parse("").unwrap();
    assert_doc(&doc).header("").segment_count(0);
    assert_eq!(doc.format(), "");
}

// ===== Warnings =====

#[test]
fn test_weekday_and_date_warning_keeps_segment() {
    let parsed = parse_document("@Monday 3rd [Gym]\n").unwrap();
    let kinds: Vec<_> = parsed.warnings.iter().map(|w| w.kind).collect();
    assert!(kinds.contains(&WarningKind::WeekdayAndDate));
    assert_eq!(parsed.document.find("Gym", None).len(), 1);
}

#[test]
fn test_out_of_order_warning() {
    let parsed = parse_document("@1st June [Backwards]\n").unwrap();
    assert_eq!(parsed.warnings.len(), 1);
    assert_eq!(parsed.warnings[0].kind, WarningKind::OutOfOrder);
    assert_eq!(parsed.warnings[0].description.as_deref(), Some("Backwards"));
}

#[test]
fn test_ongoing_period_warning() {
    let parsed = parse_document("@09:00-10:00... [Confused]\n").unwrap();
    let kinds: Vec<_> = parsed.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::OngoingPeriod]);
}

#[test]
fn test_end_before_start_warning() {
    let parsed = parse_document("@2024 June 1st 23:00-01:00 [Night]\n").unwrap();
    let kinds: Vec<_> = parsed.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::EndBeforeStart]);

    let night = parsed.document.find("Night", None)[0];
    assert!(night.time.is_period());
    assert_eq!(night.time.interval_minutes(), None);
}

#[test]
fn test_period_into_next_day_is_not_reversed() {
    let parsed = parse_document("@2024 June 1st 23:00-2nd 01:00 [Night]\n").unwrap();
    assert!(parsed.warnings.is_empty());
    assert_eq!(
        parsed.document.find("Night", None)[0].time.interval_minutes(),
        Some(120)
    );
}

#[test]
fn test_outside_scope_warning() {
    let parsed = parse_document("@June\n\t@July [Elsewhere]\n").unwrap();
    let kinds: Vec<_> = parsed.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, vec![WarningKind::OutsideScope]);
}

#[test]
fn test_clean_document_has_no_warnings() {
    let parsed = parse_document("for 2024:\n\n@June\n\t@1st\n\t\t@09:00-09:15 [Standup]\n").unwrap();
    assert!(parsed.warnings.is_empty());
}

// ===== Errors =====

#[test]
fn test_unexpected_character() {
    let err = parse("@June %\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: '%',
            position: Position::new(1, 7),
        }
    );
}

#[test]
fn test_invalid_clock() {
    let err = parse("@June\n\t@25:00 [Late]\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidTime {
            source: TimeError::InvalidClock("25:00".into()),
            position: Position::new(2, 3),
        }
    );
}

#[test]
fn test_shorthand_with_explicit_end() {
    let err = parse("@09:00-10:00-11:00\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidPeriod {
            position: Position::new(1, 13),
        }
    );
}

#[test]
fn test_shorthand_inside_end_literal() {
    let err = parse("@June 1st-2nd 09:00-10:00\n").unwrap_err();
    assert!(matches!(err, ParseError::InvalidPeriod { .. }));
}

#[test]
fn test_stray_description() {
    let err = parse("@June\n[loose]\n").unwrap_err();
    match err {
        ParseError::UnexpectedToken { found, position, .. } => {
            assert_eq!(found, "description '[loose]'");
            assert_eq!(position, Position::new(2, 1));
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

#[test]
fn test_option_outside_command_aborts() {
    let err = parse("@June\n\t#length hour\n").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_missing_time_after_marker() {
    let err = parse("@ [Nothing]\n").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}
