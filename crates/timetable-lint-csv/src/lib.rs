//! # timetable-lint-csv
//!
//! Loads a schedule exported as CSV into a [`Worksheet`] and writes it back.
//! Row 1 of the file is row 1 of the sheet; nothing is treated as a header
//! unless [`CsvReadOptions::has_header`] says so.
//!
//! [`Worksheet`]: timetable_lint_core::Worksheet

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
