//! Splitting a grid into three-row schedule entries

use timetable_lint_core::{CellRange, CellValue};

use crate::merge_index::MergedRegionIndex;

/// Rows per entry: subject, teacher, location
pub const ENTRY_HEIGHT: u32 = 3;

/// One class slot of a grid
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    /// Absolute block of the entry, always three rows high
    pub offset: CellRange,
    /// Subject, teacher and location cells, top to bottom
    pub values: [CellValue; 3],
}

impl ScheduleEntry {
    pub fn subject(&self) -> &CellValue {
        &self.values[0]
    }

    pub fn teacher(&self) -> &CellValue {
        &self.values[1]
    }

    pub fn location(&self) -> &CellValue {
        &self.values[2]
    }
}

/// Walk `grid` band by band and emit its entries
///
/// `values` is the row-major content of `grid`; rows past its end read as
/// empty, so a trailing partial band is still inspected. A column whose three
/// cells are all blank yields nothing. When the subject cell sits in a merged
/// region the entry takes the region's origin and column span, and the
/// other columns of the region are not emitted again in that band.
pub fn segment(
    grid: &CellRange,
    values: &[Vec<CellValue>],
    merges: &MergedRegionIndex,
) -> Vec<ScheduleEntry> {
    let cell = |row: u32, col: u32| -> CellValue {
        values
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .cloned()
            .unwrap_or_default()
    };

    let mut entries = Vec::new();

    for band in (0..grid.num_rows).step_by(ENTRY_HEIGHT as usize) {
        let mut consumed = vec![false; grid.num_cols as usize];

        for col in 0..grid.num_cols {
            if consumed[col as usize] {
                continue;
            }

            let triple = [cell(band, col), cell(band + 1, col), cell(band + 2, col)];
            if triple.iter().all(CellValue::is_blank) {
                continue;
            }

            let start = grid.cell(band, col);
            let offset = match merges.lookup(start.row, start.col) {
                Some(region) => {
                    tracing::trace!("Merged range: {}", region.encode());
                    for covered in region.col..=region.end_col() {
                        if covered >= grid.col {
                            if let Some(slot) = consumed.get_mut((covered - grid.col) as usize) {
                                *slot = true;
                            }
                        }
                    }
                    CellRange::new(region.row, region.col, ENTRY_HEIGHT, region.num_cols)
                }
                None => CellRange::new(start.row, start.col, ENTRY_HEIGHT, 1),
            };

            entries.push(ScheduleEntry {
                offset,
                values: triple,
            });
        }
    }

    entries
}
