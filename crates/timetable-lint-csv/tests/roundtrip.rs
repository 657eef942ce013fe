use pretty_assertions::assert_eq;
use timetable_lint_core::CellValue;
use timetable_lint_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};

const SCHEDULE: &str = "\
B21-01,B21-02,-
MONDAY,,
9:00-10:30,\"Philosophy (lec)\",\" Math\"
,Ivanov,
,108 [ONLY ON 22/01],
";

#[test]
fn test_file_roundtrip_preserves_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.csv");
    std::fs::write(&path, SCHEDULE).unwrap();

    let ws = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();
    assert_eq!(ws.get_value_at(3, 3), CellValue::from(" Math"));
    assert_eq!(ws.get_value_at(5, 2), CellValue::from("108 [ONLY ON 22/01]"));

    let out = dir.path().join("out.csv");
    CsvWriter::write_file(&ws, &out, &CsvWriteOptions::default()).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let reread = CsvReader::read(written.as_bytes(), &CsvReadOptions::default()).unwrap();

    let before: Vec<_> = ws.iter_cells().map(|(r, c, v)| (r, c, v.clone())).collect();
    let after: Vec<_> = reread
        .iter_cells()
        .map(|(r, c, v)| (r, c, v.clone()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_numbers_render_without_fraction() {
    let ws = CsvReader::read("108,2.5\n".as_bytes(), &CsvReadOptions::default()).unwrap();

    let mut buf = Vec::new();
    CsvWriter::write(&ws, &mut buf, &CsvWriteOptions::default()).unwrap();

    assert_eq!(String::from_utf8(buf).unwrap(), "108,2.5\n");
}

#[test]
fn test_empty_sheet_writes_nothing() {
    let ws = timetable_lint_core::Worksheet::new("Empty");

    let mut buf = Vec::new();
    CsvWriter::write(&ws, &mut buf, &CsvWriteOptions::default()).unwrap();

    assert!(buf.is_empty());
}

#[test]
fn test_trimmed_drops_blank_tail() {
    let mut ws = timetable_lint_core::Worksheet::new("Settings");
    ws.set_cell_value("A2", "subjects").unwrap();
    ws.set_cell_value("A3", "DSA").unwrap();
    ws.set_dimensions(1002, 6);

    let mut full = Vec::new();
    CsvWriter::write(&ws, &mut full, &CsvWriteOptions::default()).unwrap();
    assert_eq!(String::from_utf8(full).unwrap().lines().count(), 1002);

    let mut trimmed = Vec::new();
    CsvWriter::write(&ws, &mut trimmed, &CsvWriteOptions::default().trimmed()).unwrap();
    assert_eq!(String::from_utf8(trimmed).unwrap(), "\"\"\nsubjects\nDSA\n");
}
