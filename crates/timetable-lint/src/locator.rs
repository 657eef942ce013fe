//! Finding schedule grids inside a sheet
//!
//! A schedule sheet has time-slot labels (`9:00-10:30`) in some columns and
//! day names in the first column. Every block strictly between two
//! consecutive time columns and two consecutive day rows is one grid; the
//! label cells themselves belong to no grid.

use lazy_regex::{lazy_regex, Lazy, Regex};
use timetable_lint_core::{CellRange, CellValue};

use crate::warning::Warning;

/// Day labels recognised in the first column, exact and case-sensitive
pub const DAYS: [&str; 6] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

/// Header cell marking the column after the last schedule column
pub const END_OF_SCHEDULE_MARKER: &str = "-";

static TIMESLOT: Lazy<Regex> = lazy_regex!(r"^[0-9]{1,2}:[0-9]{2}-[0-9]{1,2}:[0-9]{2}$");

/// A grid as 0-based offsets into the working range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    pub row: u32,
    pub num_rows: u32,
    pub col: u32,
    pub num_cols: u32,
}

/// Classifies rows and columns of a block of values
pub struct GridLocator<'a> {
    values: &'a [Vec<CellValue>],
    origin: CellRange,
}

impl<'a> GridLocator<'a> {
    /// `values` is the row-major content of `origin`
    pub fn new(values: &'a [Vec<CellValue>], origin: CellRange) -> Self {
        Self { values, origin }
    }

    /// Columns holding at least one time-slot label, left to right
    pub fn find_time_columns(&self, warnings: &mut Vec<Warning>) -> Vec<u32> {
        let width = self.values.first().map_or(0, Vec::len);
        let columns: Vec<u32> = (0..width)
            .filter(|&col| {
                self.values.iter().any(|row| {
                    row.get(col)
                        .and_then(CellValue::as_str)
                        .is_some_and(|v| TIMESLOT.is_match(v))
                })
            })
            .map(|col| col as u32)
            .collect();

        if columns.is_empty() {
            warnings.push(Warning::new("No time columns found"));
        }
        tracing::debug!("Time columns: {columns:?}");
        columns
    }

    /// Rows whose first cell is a day name, top to bottom
    pub fn find_day_rows(&self, warnings: &mut Vec<Warning>) -> Vec<u32> {
        let rows: Vec<u32> = self
            .values
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.first()
                    .and_then(CellValue::as_str)
                    .is_some_and(|v| DAYS.contains(&v))
            })
            .map(|(i, _)| i as u32)
            .collect();

        if rows.is_empty() {
            warnings.push(Warning::new("No day rows found"));
        }
        tracing::debug!("Day rows: {rows:?}");
        rows
    }

    /// All grids of the block, column band by column band
    pub fn build_grids(&self, warnings: &mut Vec<Warning>) -> Vec<CellRange> {
        let time_columns = self.find_time_columns(warnings);
        let day_rows = self.find_day_rows(warnings);

        let grids: Vec<CellRange> = partition(
            &time_columns,
            &day_rows,
            self.origin.num_cols,
            self.origin.num_rows,
        )
        .into_iter()
        .map(|span| self.origin.offset(span.row, span.col, span.num_rows, span.num_cols))
        .collect();

        tracing::debug!(
            "Grids: {}",
            grids.iter().map(CellRange::encode).collect::<Vec<_>>().join(",")
        );
        grids
    }
}

/// Split a `width` x `height` block by marker columns and rows
///
/// The block's width and height act as closing sentinels. Each span starts
/// one past a marker and stops before the next one; spans with no rows or no
/// columns are dropped.
pub fn partition(time_columns: &[u32], day_rows: &[u32], width: u32, height: u32) -> Vec<GridSpan> {
    let grid_columns: Vec<u32> = time_columns.iter().copied().chain([width]).collect();
    let grid_rows: Vec<u32> = day_rows.iter().copied().chain([height]).collect();

    let mut spans = Vec::new();
    for cols in grid_columns.windows(2) {
        let col = cols[0] + 1;
        let num_cols = cols[1].saturating_sub(col);
        for rows in grid_rows.windows(2) {
            let row = rows[0] + 1;
            let num_rows = rows[1].saturating_sub(row);
            if num_rows > 0 && num_cols > 0 {
                spans.push(GridSpan {
                    row,
                    num_rows,
                    col,
                    num_cols,
                });
            }
        }
    }
    spans
}

/// 0-based index of the first `-` cell in the header row
///
/// `header_range` is only used to locate the warning when no marker exists.
pub fn find_end_of_schedule_column(
    header: &[CellValue],
    header_range: &CellRange,
    warnings: &mut Vec<Warning>,
) -> Option<u32> {
    let found = header
        .iter()
        .position(|v| v.as_str() == Some(END_OF_SCHEDULE_MARKER))
        .map(|i| i as u32);

    if found.is_none() {
        warnings.push(Warning::at_range(
            "No end of schedule column found",
            header_range,
        ));
    }
    found
}
