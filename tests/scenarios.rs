//! End-to-end scenarios over the public API
//!
//! Each test walks a journal through parse, normalize and edit operations and
//! checks the resulting tree with the fluent assertions.

use chrono::NaiveDate;
use dtl::ast::SegmentPath;
use dtl::testing::assert_doc;
use dtl::{parse, parse_document, Document, Segment, TimeKind, TimeValue, WarningKind};

fn time(explicit: &[(TimeKind, &str)]) -> TimeValue {
    TimeValue::combine(explicit.iter().copied(), None).unwrap()
}

fn first_path(doc: &Document, description: &str) -> SegmentPath {
    doc.find_with_parent(description, None)[0].path.clone()
}

#[test]
fn test_nested_scaffolds_round_trip() {
    let source = "@2024\n\t@June\n\t\t@1st [Standup]\n";
    let doc = parse(source).unwrap();

    assert_doc(&doc).segment_count(1).segment(0, |year| {
        year.time("2024").child_count(1).child(0, |june| {
            june.time("2024 June").child_count(1).child(0, |day| {
                day.time("2024 June 1st").description("Standup");
            });
        });
    });

    let standup = doc.find("Standup", None)[0];
    assert_eq!(standup.time.get(TimeKind::Year), Some(2024));
    assert_eq!(standup.time.get(TimeKind::Month), Some(6));
    assert_eq!(standup.time.get(TimeKind::DayOfMonth), Some(1));
    assert_eq!(doc.format(), source);
}

#[test]
fn test_repeated_scaffolds_merge() {
    let doc = parse("@2024\n\t@June\n\t\t@2nd [B]\n@2024\n\t@June\n\t\t@1st [A]\n").unwrap();

    assert_doc(&doc).segment_count(1).segment(0, |year| {
        year.child_count(1).child(0, |june| {
            june.child_count(2)
                .child(0, |a| {
                    a.time("2024 June 1st").description("A");
                })
                .child(1, |b| {
                    b.time("2024 June 2nd").description("B");
                });
        });
    });
    assert_eq!(doc.format(), "@2024\n\t@June\n\t\t@1st [A]\n\t\t@2nd [B]\n");
}

#[test]
fn test_closing_an_ongoing_entry() {
    let mut doc = parse("@2024 June 1st\n\t@09:00... [Focus]\n").unwrap();
    let path = first_path(&doc, "Focus");

    let end = time(&[(TimeKind::ClockTime, "10:30")]);
    assert!(doc.end_entry(&path, end));

    assert_doc(&doc).segment(0, |day| {
        day.child_count(1).child(0, |focus| {
            focus
                .ongoing(false)
                .period_end(Some("2024 June 1st 10:30"))
                .description("Focus");
        });
    });
    assert!(doc.find("Focus", Some(true)).is_empty());
    assert_eq!(doc.format(), "@2024 June 1st\n\t@09:00-10:30 [Focus]\n");
}

#[test]
fn test_closing_at_now() {
    let mut doc = parse("@2024 June 1st\n\t@09:00... [Focus]\n").unwrap();
    let path = first_path(&doc, "Focus");
    let now = TimeValue::now();

    assert!(doc.end_entry(&path, now.clone()));

    let focus = doc.find("Focus", None)[0];
    assert!(focus.time.is_period());
    assert!(!focus.ongoing);
    assert_eq!(focus.time.period_end(), Some(&now.start()));

    let rendered = doc.format();
    assert!(rendered.contains("@09:00-"));
    assert!(!rendered.contains("..."));
}

#[test]
fn test_captured_instant_parses_back() {
    let instants = [
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 5, 0).unwrap(),
        NaiveDate::from_ymd_opt(1999, 12, 31).unwrap().and_hms_opt(23, 59, 0).unwrap(),
        NaiveDate::from_ymd_opt(2025, 2, 3).unwrap().and_hms_opt(0, 0, 0).unwrap(),
    ];

    for instant in instants {
        let captured = TimeValue::from_datetime(instant);
        let parsed = parse_document(&format!("@{} [Now]\n", captured)).unwrap();
        assert!(parsed.warnings.is_empty());

        let found = parsed.document.find("Now", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].time, captured);
        assert_eq!(found[0].time.get(TimeKind::Weekday), None);
    }
}

#[test]
fn test_current_time_parses_back() {
    let now = TimeValue::now();
    let doc = parse(&format!("@{} [Now]\n", now)).unwrap();
    assert_eq!(doc.find("Now", None)[0].time, now);
}

#[test]
fn test_weekday_with_date_is_kept() {
    let segment = Segment::new(time(&[(TimeKind::DayOfMonth, "3rd"), (TimeKind::Weekday, "Monday")]))
        .with_description("Gym");
    let mut doc = Document::default().with_segment(segment);

    let warnings = doc.normalize();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, WarningKind::WeekdayAndDate);
    assert_eq!(warnings[0].description.as_deref(), Some("Gym"));
    assert_eq!(doc.find("Gym", None).len(), 1);
}

#[test]
fn test_find_filters_on_ongoing() {
    let source = "@2024 June 1st\n\t@09:00-09:15 [Standup]\n\t@16:00... [Standup]\n\t@17:00 [Standupish]\n";
    let doc = parse(source).unwrap();

    let finished = doc.find("Standup", Some(false));
    assert_eq!(finished.len(), 1);
    assert!(!finished[0].ongoing);

    let running = doc.find("Standup", Some(true));
    assert_eq!(running.len(), 1);
    assert_eq!(running[0].time.get(TimeKind::ClockTime), Some(16 * 60));

    assert_eq!(doc.find("Standup", None).len(), 2);
}

#[test]
fn test_find_with_parent_reports_container() {
    let doc = parse("for 2024:\n\n@June\n\t@1st [Talk]\n@July [Talk]\n").unwrap();
    let found = doc.find_with_parent("Talk", None);

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].parent.scope().get(TimeKind::Month), Some(6));
    assert_eq!(found[1].parent.scope(), time(&[(TimeKind::Year, "2024")]));
    assert_eq!(found[1].path.depth(), 1);
}

#[test]
fn test_create_entry_descends_into_scaffolds() {
    let mut doc = parse("@2024\n\t@June\n\t\t@1st [Standup]\n").unwrap();
    let lunch = time(&[
        (TimeKind::Year, "2024"),
        (TimeKind::Month, "June"),
        (TimeKind::DayOfMonth, "1st"),
        (TimeKind::ClockTime, "12:00"),
    ]);

    assert!(doc.create_entry(lunch, "Lunch", false));
    assert_eq!(
        doc.format(),
        "@2024\n\t@June\n\t\t@1st [Standup]\n\t\t\t@12:00 [Lunch]\n"
    );
}

#[test]
fn test_create_entry_outside_header_is_rejected() {
    let mut doc = parse("for 2024:\n\n@June [Summer]\n").unwrap();
    let outside = time(&[(TimeKind::Year, "2023"), (TimeKind::Month, "May")]);

    assert!(!doc.create_entry(outside, "Elsewhere", false));
    assert_eq!(doc.format(), "for 2024:\n\n@June [Summer]\n");
}

#[test]
fn test_remove_segment_keeps_siblings() {
    let mut doc = parse("@June\n\t@1st [A]\n\t@2nd [B]\n").unwrap();
    let path = first_path(&doc, "A");

    let removed = doc.remove_segment(&path).unwrap();
    assert_eq!(removed.description.as_deref(), Some("A"));
    assert_eq!(doc.format(), "@June\n\t@2nd [B]\n");
    assert!(doc.remove_segment(&path).is_none());
}

#[test]
fn test_warnings_do_not_block_parsing() {
    let parsed = parse_document("@June\n\t@1st Monday [Mixed]\n\t@July [Outside]\n").unwrap();
    let kinds: Vec<_> = parsed.warnings.iter().map(|w| w.kind).collect();

    assert!(kinds.contains(&WarningKind::WeekdayAndDate));
    assert!(kinds.contains(&WarningKind::OutsideScope));
    assert_eq!(parsed.document.find("Mixed", None).len(), 1);
    assert_eq!(parsed.document.find("Outside", None).len(), 1);
}
