//! # timetable-lint-core
//!
//! Grid model used by the timetable linter.
//!
//! This crate provides the host-side types the lint engine reads from and
//! writes to:
//! - [`CellValue`] - Cell values (empty, strings, numbers, booleans)
//! - [`CellAddress`] and [`CellRange`] - 1-based addressing and the A1 range codec
//! - [`Worksheet`] - Sparse cells, merged regions and the current selection
//! - [`Workbook`] - Ordered sheets, sheet ids and named ranges
//!
//! ## Example
//!
//! ```rust
//! use timetable_lint_core::{CellRange, CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("A2", "MONDAY").unwrap();
//! sheet.set_cell_value_at(1, 2, "9:00-10:30").unwrap();
//! sheet.merge_cells(&CellRange::decode("B3:C3").unwrap()).unwrap();
//!
//! assert_eq!(sheet.get_value_at(2, 1), CellValue::from("MONDAY"));
//! ```

pub mod cell;
pub mod error;
pub mod named_range;
pub mod range;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellRange, CellValue};
pub use error::{Error, Result};
pub use named_range::NamedRange;
pub use range::Range;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
