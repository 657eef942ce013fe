//! Read-only view over a block of worksheet cells

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::worksheet::Worksheet;

/// A reference to a range of cells in a worksheet
pub struct Range<'a> {
    worksheet: &'a Worksheet,
    range: CellRange,
}

impl<'a> Range<'a> {
    /// Create a new range reference
    pub fn new(worksheet: &'a Worksheet, range: CellRange) -> Self {
        Self { worksheet, range }
    }

    /// Get the cell range
    pub fn range(&self) -> &CellRange {
        &self.range
    }

    /// Get the number of rows
    pub fn num_rows(&self) -> u32 {
        self.range.num_rows
    }

    /// Get the number of columns
    pub fn num_cols(&self) -> u32 {
        self.range.num_cols
    }

    /// Get a cell value by 0-based position within the range
    pub fn value(&self, row: u32, col: u32) -> CellValue {
        let addr = self.range.cell(row, col);
        self.worksheet.get_value_at(addr.row, addr.col)
    }

    /// All values in the range, row-major
    pub fn values(&self) -> Vec<Vec<CellValue>> {
        (self.range.row..=self.range.end_row())
            .map(|row| {
                (self.range.col..=self.range.end_col())
                    .map(|col| self.worksheet.get_value_at(row, col))
                    .collect()
            })
            .collect()
    }

    /// Iterate over all cells in the range with their absolute address
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, Option<&'a CellValue>)> + '_ {
        let worksheet = self.worksheet;
        self.range
            .cells()
            .map(move |addr| (addr, worksheet.value_ref_at(addr.row, addr.col)))
    }

    /// Merged regions overlapping this range
    pub fn merged_regions(&self) -> Vec<CellRange> {
        self.worksheet.merged_regions_in(&self.range)
    }

    /// Get the A1-style address of this range
    pub fn address(&self) -> String {
        self.range.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relative_access() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("C4", "lab").unwrap();

        let range = ws.range(CellRange::decode("B3:D5").unwrap());
        assert_eq!(range.value(1, 1), CellValue::from("lab"));
        assert_eq!(range.value(0, 0), CellValue::Empty);
        assert_eq!(range.num_rows(), 3);
        assert_eq!(range.address(), "B3:D5");
    }

    #[test]
    fn test_cells_carry_absolute_addresses() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("B2", "x").unwrap();

        let range = ws.range(CellRange::decode("B2:C2").unwrap());
        let cells: Vec<_> = range
            .cells()
            .map(|(addr, v)| (addr.to_a1_string(), v.cloned()))
            .collect();

        assert_eq!(
            cells,
            vec![
                ("B2".to_string(), Some(CellValue::from("x"))),
                ("C2".to_string(), None),
            ]
        );
    }
}
