//! Workbook type - the main document structure

use crate::cell::CellRange;
use crate::error::{Error, Result};
use crate::named_range::{NamedRange, NamedRangeCollection};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook: ordered sheets, an active sheet and workbook-wide names
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Active sheet index
    active_sheet: usize,
    /// Named ranges (defined names)
    named_ranges: NamedRangeCollection,
    /// Id handed to the next sheet added
    next_sheet_id: u32,
}

impl Workbook {
    /// Create a new empty workbook with one worksheet
    pub fn new() -> Self {
        let mut wb = Self::empty();
        wb.push_sheet(Worksheet::new("Sheet1"));
        wb
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            active_sheet: 0,
            named_ranges: NamedRangeCollection::new(),
            next_sheet_id: 0,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        Ok(self.push_sheet(Worksheet::new(name)))
    }

    /// Add an existing worksheet to the workbook, assigning it a fresh id
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        Ok(self.push_sheet(worksheet))
    }

    /// Get the active sheet index
    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    /// Set the active sheet index
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.active_sheet = index;
        Ok(())
    }

    /// Get the active worksheet
    pub fn active_worksheet(&self) -> Result<&Worksheet> {
        let count = self.worksheets.len();
        self.worksheets
            .get(self.active_sheet)
            .ok_or(Error::SheetOutOfBounds(self.active_sheet, count))
    }

    /// Get the active worksheet mutably
    pub fn active_worksheet_mut(&mut self) -> Result<&mut Worksheet> {
        let count = self.worksheets.len();
        self.worksheets
            .get_mut(self.active_sheet)
            .ok_or(Error::SheetOutOfBounds(self.active_sheet, count))
    }

    /// Make a sheet active and select the given ranges on it
    pub fn activate(&mut self, sheet: usize, ranges: Vec<CellRange>) -> Result<()> {
        self.set_active_sheet(sheet)?;
        self.active_worksheet_mut()?.set_active_ranges(ranges);
        Ok(())
    }

    // ==================== Named Ranges ====================

    /// Define (or redefine) a named range on a sheet
    ///
    /// # Example
    /// ```
    /// use timetable_lint_core::{CellRange, Workbook};
    ///
    /// let mut wb = Workbook::new();
    /// wb.define_name("Settings", 0, CellRange::decode("A2:F1002").unwrap()).unwrap();
    /// assert!(wb.named_range("settings").is_some());
    /// ```
    pub fn define_name(&mut self, name: &str, sheet: usize, range: CellRange) -> Result<()> {
        if sheet >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(sheet, self.worksheets.len()));
        }
        self.named_ranges.define(NamedRange::new(name, sheet, range));
        Ok(())
    }

    /// Look up a named range
    pub fn named_range(&self, name: &str) -> Option<&NamedRange> {
        self.named_ranges.get(name)
    }

    /// Remove a named range
    pub fn remove_name(&mut self, name: &str) -> Option<NamedRange> {
        self.named_ranges.remove(name)
    }

    /// Get the named range collection (read-only)
    pub fn named_ranges(&self) -> &NamedRangeCollection {
        &self.named_ranges
    }

    fn take_sheet_id(&mut self) -> u32 {
        let id = self.next_sheet_id;
        self.next_sheet_id += 1;
        id
    }

    fn push_sheet(&mut self, mut worksheet: Worksheet) -> usize {
        worksheet.set_id(self.take_sheet_id());
        self.worksheets.push(worksheet);
        self.worksheets.len() - 1
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        let name_lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");
        assert_eq!(wb.worksheet(0).unwrap().id(), 0);
    }

    #[test]
    fn test_sheet_ids_are_unique() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();
        let mut settings = Worksheet::new("Settings");
        settings.set_id(0);
        // Ids are reassigned on insertion
        wb.add_existing_worksheet(settings).unwrap();

        let ids: Vec<_> = wb.worksheets().map(|ws| ws.id()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("SHEET1").is_err());
        assert!(wb.add_worksheet_with_name("sheet1").is_err());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("Sheet/1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet[1]").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(wb.add_worksheet_with_name(&long_name).is_err());
    }

    #[test]
    fn test_activate() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();

        let range = CellRange::decode("C3:C9").unwrap();
        wb.activate(1, vec![range]).unwrap();

        assert_eq!(wb.active_sheet(), 1);
        assert_eq!(wb.active_worksheet().unwrap().active_range(), Some(range));
        assert!(wb.activate(5, vec![]).is_err());
    }

    #[test]
    fn test_define_name_requires_sheet() {
        let mut wb = Workbook::new();
        let range = CellRange::decode("A2:F1002").unwrap();

        assert!(wb.define_name("Settings", 3, range).is_err());
        assert!(wb.named_range("Settings").is_none());
    }
}
