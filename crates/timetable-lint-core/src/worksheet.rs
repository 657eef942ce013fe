//! Worksheet type

use crate::cell::{CellAddress, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::range::Range;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Stable sheet id, assigned by the owning workbook
    id: u32,
    /// Cell storage
    cells: CellStorage,
    /// Grid size, independent of where content ends
    dimensions: (u32, u32),
    /// Currently selected ranges
    selection: Vec<CellRange>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            id: 0,
            cells: CellStorage::new(),
            dimensions: (0, 0),
            selection: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the sheet id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Override the sheet id, e.g. to match the id of an exported sheet
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "A1")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by 1-based indices
    pub fn get_value_at(&self, row: u32, col: u32) -> CellValue {
        self.cells.get(row, col).cloned().unwrap_or_default()
    }

    /// Borrow a cell value by 1-based indices
    pub fn value_ref_at(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(row, col)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 1-based indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u32,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set(row, col, value.into());
        Ok(())
    }

    /// Clear a cell by indices
    pub fn clear_cell_at(&mut self, row: u32, col: u32) {
        self.cells.remove(row, col);
    }

    // === Extents ===

    /// Last row holding content (0 when the sheet is empty)
    pub fn last_row(&self) -> u32 {
        self.cells.used_bounds().map(|(_, _, r, _)| r).unwrap_or(0)
    }

    /// Last column holding content (0 when the sheet is empty)
    pub fn last_column(&self) -> u32 {
        self.cells.used_bounds().map(|(_, _, _, c)| c).unwrap_or(0)
    }

    /// Number of rows in the grid, including trailing blank rows
    pub fn max_rows(&self) -> u32 {
        let merged = self
            .cells
            .merged_regions()
            .iter()
            .map(|r| r.end_row())
            .max()
            .unwrap_or(0);
        self.dimensions.0.max(self.last_row()).max(merged)
    }

    /// Number of columns in the grid, including trailing blank columns
    pub fn max_columns(&self) -> u32 {
        let merged = self
            .cells
            .merged_regions()
            .iter()
            .map(|r| r.end_col())
            .max()
            .unwrap_or(0);
        self.dimensions.1.max(self.last_column()).max(merged)
    }

    /// Declare the grid size (e.g. the shape of a loaded file)
    pub fn set_dimensions(&mut self, rows: u32, cols: u32) {
        self.dimensions = (rows, cols);
    }

    /// The block from `A1` to the bottom-right corner of the grid
    ///
    /// An empty sheet still yields the single cell `A1`.
    pub fn data_range(&self) -> CellRange {
        CellRange::new(1, 1, self.max_rows().max(1), self.max_columns().max(1))
    }

    // === Range Operations ===

    /// Get a read-only view of a block of cells
    pub fn range(&self, range: CellRange) -> Range<'_> {
        Range::new(self, range)
    }

    /// Read a block of values, row-major; absent cells are `Empty`
    pub fn values(&self, range: &CellRange) -> Vec<Vec<CellValue>> {
        self.range(*range).values()
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Merged regions that overlap the given block
    pub fn merged_regions_in(&self, range: &CellRange) -> Vec<CellRange> {
        self.cells
            .merged_regions()
            .iter()
            .filter(|r| r.overlaps(range))
            .copied()
            .collect()
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        for existing in self.cells.merged_regions() {
            if range.overlaps(existing) {
                return Err(Error::MergedCellConflict(range.to_string()));
            }
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }

    /// Check if a cell is part of a merged region
    pub fn is_merged(&self, row: u32, col: u32) -> bool {
        self.cells.is_merged(CellAddress::new(row, col))
    }

    // === Selection ===

    /// Currently selected ranges
    pub fn active_ranges(&self) -> &[CellRange] {
        &self.selection
    }

    /// The first selected range, if any
    pub fn active_range(&self) -> Option<CellRange> {
        self.selection.first().copied()
    }

    /// Replace the selection
    pub fn set_active_ranges(&mut self, ranges: Vec<CellRange>) {
        self.selection = ranges;
    }

    // === Misc ===

    /// Check if the worksheet is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all non-empty cells, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> {
        self.cells.iter()
    }

    fn validate_cell_position(&self, row: u32, col: u32) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }
        if col == 0 || col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_worksheet() {
        let ws = Worksheet::new("Schedule");
        assert_eq!(ws.name(), "Schedule");
        assert!(ws.is_empty());
        assert_eq!(ws.data_range(), CellRange::new(1, 1, 1, 1));
    }

    #[test]
    fn test_set_cell_values() {
        let mut ws = Worksheet::new("Test");

        ws.set_cell_value("A1", "MONDAY").unwrap();
        ws.set_cell_value("B2", 42.0).unwrap();
        ws.set_cell_value_at(3, 1, true).unwrap();

        assert_eq!(ws.get_value("A1").unwrap(), CellValue::from("MONDAY"));
        assert_eq!(ws.get_value_at(2, 2), CellValue::Number(42.0));
        assert_eq!(ws.get_value_at(3, 1), CellValue::Boolean(true));
        assert_eq!(ws.get_value_at(9, 9), CellValue::Empty);
    }

    #[test]
    fn test_zero_index_rejected() {
        let mut ws = Worksheet::new("Test");
        assert!(ws.set_cell_value_at(0, 1, "x").is_err());
        assert!(ws.set_cell_value_at(1, 0, "x").is_err());
    }

    #[test]
    fn test_extents() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("C5", "x").unwrap();

        assert_eq!(ws.last_row(), 5);
        assert_eq!(ws.last_column(), 3);

        ws.set_dimensions(10, 4);
        assert_eq!(ws.max_rows(), 10);
        assert_eq!(ws.max_columns(), 4);
        assert_eq!(ws.data_range().encode(), "A1:D10");
    }

    #[test]
    fn test_values_block() {
        let mut ws = Worksheet::new("Test");
        ws.set_cell_value("B2", "x").unwrap();
        ws.set_cell_value("C3", "y").unwrap();

        let values = ws.values(&CellRange::decode("B2:C3").unwrap());
        assert_eq!(
            values,
            vec![
                vec![CellValue::from("x"), CellValue::Empty],
                vec![CellValue::Empty, CellValue::from("y")],
            ]
        );
    }

    #[test]
    fn test_merge_cells() {
        let mut ws = Worksheet::new("Test");

        let range = CellRange::decode("A1:B2").unwrap();
        ws.merge_cells(&range).unwrap();
        assert_eq!(ws.merged_regions().len(), 1);
        assert!(ws.is_merged(2, 2));

        let overlap = CellRange::decode("B2:C3").unwrap();
        assert!(ws.merge_cells(&overlap).is_err());
        assert_eq!(ws.merged_regions().len(), 1);
    }

    #[test]
    fn test_merged_regions_in() {
        let mut ws = Worksheet::new("Test");
        ws.merge_cells(&CellRange::decode("A1:B1").unwrap()).unwrap();
        ws.merge_cells(&CellRange::decode("D5:E5").unwrap()).unwrap();

        let found = ws.merged_regions_in(&CellRange::decode("A1:C3").unwrap());
        assert_eq!(found, vec![CellRange::decode("A1:B1").unwrap()]);
    }

    #[test]
    fn test_selection() {
        let mut ws = Worksheet::new("Test");
        assert_eq!(ws.active_range(), None);

        let range = CellRange::decode("B2:D4").unwrap();
        ws.set_active_ranges(vec![range]);
        assert_eq!(ws.active_range(), Some(range));
    }
}
