//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use timetable_lint_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Records may have different lengths; the sheet is sized to the longest.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());
        let mut row_idx = 0u32;
        let mut width = 0u32;

        if options.has_header {
            let headers = csv_reader.headers()?.clone();
            row_idx += 1;
            for (col, value) in headers.iter().enumerate() {
                worksheet.set_cell_value_at(row_idx, col as u32 + 1, value)?;
            }
            width = width.max(headers.len() as u32);
        }

        for result in csv_reader.records() {
            let record = result?;
            row_idx += 1;

            for (col, field) in record.iter().enumerate() {
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else {
                    CellValue::string(field)
                };

                worksheet.set_cell_value_at(row_idx, col as u32 + 1, value)?;
            }
            width = width.max(record.len() as u32);
        }

        worksheet.set_dimensions(row_idx, width);
        Ok(worksheet)
    }

    /// Detect the type of a field value
    ///
    /// Text is kept byte for byte, surrounding whitespace included.
    fn detect_type(field: &str) -> CellValue {
        if field.is_empty() {
            return CellValue::Empty;
        }

        match field {
            "TRUE" => return CellValue::Boolean(true),
            "FALSE" => return CellValue::Boolean(false),
            _ => {}
        }

        // Only plain decimal numbers; "9:00", "1e5" and padded numbers stay text
        let numeric = field
            .trim_start_matches('-')
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.');
        if numeric && field.chars().any(|c| c.is_ascii_digit()) {
            if let Ok(n) = field.parse::<f64>() {
                return CellValue::Number(n);
            }
        }

        CellValue::string(field)
    }
}
