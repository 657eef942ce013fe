//! Full schedule passes over an in-memory workbook

mod common;

use common::{messages, schedule_workbook};
use pretty_assertions::assert_eq;
use timetable_lint::prelude::*;
use timetable_lint::{AdditionalModifierKind, EventModifierKind};

#[test]
fn test_header_is_clean() {
    let session = LintSession::new(schedule_workbook());
    assert!(session.lint_header().unwrap().is_empty());
}

#[test]
fn test_schedule_warnings() {
    let mut session = LintSession::new(schedule_workbook());
    let result = session.lint_schedule().unwrap();

    assert_eq!(
        messages(&result.warnings),
        vec![
            "Unknown subject 'Data Structures and Algorithm' (did you mean 'Data Structures and Algorithms'?)",
            "Unknown location '313'",
            "Unknown subject type `seminar`. Allowed types: `lec`, `tut`, `lab`",
            "No location found",
        ]
    );

    let ranges: Vec<_> = result
        .warnings
        .iter()
        .map(|w| w.range.as_deref().unwrap())
        .collect();
    assert_eq!(ranges, vec!["D4:D6", "D4:D6", "B7:B9", "B7:B9"]);
    assert!(result.warnings.iter().all(|w| w.gid.as_deref() == Some("0")));
}

#[test]
fn test_merged_subject_widens_entry() {
    let mut session = LintSession::new(schedule_workbook());
    let result = session.lint_schedule().unwrap();

    // The merged B4:C4 entry carries the first modifier list; C is not re-emitted
    let first = &result.modifiers[0];
    assert_eq!(first.range.encode(), "B4:C6");
    assert_eq!(first.range.num_cols, 2);
    assert!(result.modifiers.iter().all(|m| m.range.col != 3 || m.range.row != 4));
}

#[test]
fn test_schedule_modifiers() {
    let mut session = LintSession::new(schedule_workbook());
    let result = session.lint_schedule().unwrap();

    let summary: Vec<_> = result
        .modifiers
        .iter()
        .map(|m| (m.range.encode(), m.modifiers[0].event_kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("B4:C6".to_string(), EventModifierKind::OnlyOn),
            ("B7:B9".to_string(), EventModifierKind::OnTba),
            ("C11:C13".to_string(), EventModifierKind::StartsAt),
        ]
    );

    let starts_at = &result.modifiers[2].modifiers[0];
    assert_eq!(starts_at.origin, "STARTS AT 9:20_FROM 05/02");
    assert_eq!(
        starts_at.additional.as_ref().map(|a| a.kind),
        Some(AdditionalModifierKind::From)
    );
}

#[test]
fn test_unknown_values_are_staged() {
    let mut session = LintSession::new(schedule_workbook());
    session.lint_schedule().unwrap();

    assert_eq!(
        session.cache().get("unknownSubjects").as_deref(),
        Some("Data Structures and Algorithm")
    );
    assert_eq!(session.cache().get("unknownLocations").as_deref(), Some("313"));
    assert_eq!(session.unknown_locations().len(), 1);
}

#[test]
fn test_accumulators_reset_between_passes() {
    let mut session = LintSession::new(schedule_workbook());
    session.lint_schedule().unwrap();

    session
        .workbook_mut()
        .worksheet_mut(0)
        .unwrap()
        .set_cell_value("D6", "108")
        .unwrap();
    session.lint_schedule().unwrap();

    assert!(session.unknown_locations().is_empty());
    assert_eq!(session.unknown_subjects().len(), 1);
}

#[test]
fn test_json_output() {
    let mut session = LintSession::new(schedule_workbook());
    let result = session.lint_schedule().unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["warnings"][1]["content"], "Unknown location '313'");
    assert_eq!(json["warnings"][1]["gid"], "0");
    assert_eq!(json["modifiers"][0]["range"], "B4:C6");
    assert_eq!(json["modifiers"][0]["modifiers"][0]["event_kind"], "ONLY_ON");
}

#[test]
fn test_select_grids() {
    let mut session = LintSession::new(schedule_workbook());
    assert!(session.select_grids().unwrap().is_empty());

    let selected: Vec<_> = session
        .workbook()
        .worksheet(0)
        .unwrap()
        .active_ranges()
        .iter()
        .map(CellRange::encode)
        .collect();
    assert_eq!(selected, vec!["B4:D9", "B11:D13"]);
}

#[test]
fn test_select_grids_without_layout() {
    let mut wb = Workbook::new();
    wb.worksheet_mut(0).unwrap().set_cell_value("A1", "notes").unwrap();
    let mut session = LintSession::new(wb);

    let warnings = session.select_grids().unwrap();
    assert_eq!(
        messages(&warnings),
        vec![
            "No end of schedule column found",
            "No time columns found",
            "No day rows found",
            "No schedule grids found",
        ]
    );
    assert_eq!(warnings[0].range.as_deref(), Some("A1:A1"));
    assert!(session.workbook().worksheet(0).unwrap().active_ranges().is_empty());
}

#[test]
fn test_numeric_location_is_coerced() {
    let mut wb = schedule_workbook();
    wb.worksheet_mut(0).unwrap().set_cell_value("D6", 108.0).unwrap();
    let mut session = LintSession::new(wb);

    let result = session.lint_schedule().unwrap();
    assert!(!messages(&result.warnings).contains(&"Unknown location '108'"));
    assert!(session.unknown_locations().is_empty());
}
