//! Shared workbook fixtures

#![allow(dead_code)]

use timetable_lint::prelude::*;

/// A two-day schedule with one merged entry, next to a populated "Settings" sheet
///
/// ```text
///      A            B                                C        D
///  1                BS - Year 1                      ...      ...   E1 = "-"
///  2                B21-01 (30)                      B21-02   B21-03
///  3   MONDAY
///  4   9:00-10:30   Data Structures and Algorithms (lec) [B4:C4]  Data Structures and Algorithm (lab)
///  5                Ivanov                                        Petrov
///  6                108 [ONLY ON 22/01, 29/01]                    313
///  7   10:40-12:10  Philosophy (seminar)
///  8                Sidorov
///  9                [ON TBA]
/// 10   TUESDAY
/// 11   9:00-10:30                                    Philosophy (tut)
/// 12                                                 Orlov
/// 13                                                 ONLINE [STARTS AT 9:20_FROM 05/02]
/// ```
pub fn schedule_workbook() -> Workbook {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    for (cell, value) in [
        ("B1", "BS - Year 1"),
        ("C1", "BS - Year 1"),
        ("D1", "BS - Year 1"),
        ("E1", "-"),
        ("B2", "B21-01 (30)"),
        ("C2", "B21-02 (28)"),
        ("D2", "B21-03"),
        ("A3", "MONDAY"),
        ("A4", "9:00-10:30"),
        ("B4", "Data Structures and Algorithms (lec)"),
        ("D4", "Data Structures and Algorithm (lab)"),
        ("B5", "Ivanov"),
        ("D5", "Petrov"),
        ("B6", "108 [ONLY ON 22/01, 29/01]"),
        ("D6", "313"),
        ("A7", "10:40-12:10"),
        ("B7", "Philosophy (seminar)"),
        ("B8", "Sidorov"),
        ("B9", "[ON TBA]"),
        ("A10", "TUESDAY"),
        ("A11", "9:00-10:30"),
        ("C11", "Philosophy (tut)"),
        ("C12", "Orlov"),
        ("C13", "ONLINE [STARTS AT 9:20_FROM 05/02]"),
    ] {
        sheet.set_cell_value(cell, value).unwrap();
    }
    sheet.merge_cells(&CellRange::decode("B4:C4").unwrap()).unwrap();

    add_settings(&mut wb, "A2:F10");
    wb
}

/// Append a "Settings" sheet and name `range` on it
pub fn add_settings(wb: &mut Workbook, range: &str) -> usize {
    let index = wb.add_worksheet_with_name("Settings").unwrap();
    let sheet = wb.worksheet_mut(index).unwrap();
    let columns: [(&str, &[&str]); 4] = [
        ("subjects", &["Data Structures and Algorithms", "Philosophy"]),
        ("groups", &["B21-01", "B21-02", "B21-03"]),
        ("courses", &["BS - Year 1"]),
        ("locations", &["108", "ONLINE"]),
    ];
    for (col, (header, values)) in columns.iter().enumerate() {
        let col = col as u32 + 1;
        sheet.set_cell_value_at(2, col, *header).unwrap();
        for (row, value) in values.iter().enumerate() {
            sheet.set_cell_value_at(row as u32 + 3, col, *value).unwrap();
        }
    }
    wb.define_name("Settings", index, CellRange::decode(range).unwrap())
        .unwrap();
    index
}

pub fn messages(warnings: &[Warning]) -> Vec<&str> {
    warnings.iter().map(|w| w.content.as_str()).collect()
}
