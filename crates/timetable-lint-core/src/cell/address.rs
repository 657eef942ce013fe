//! Cell address and range types
//!
//! Rows and columns are 1-based, the way the host grid numbers them: `A1` is
//! row 1, column 1. Columns are written as a bijective base-26 numeral
//! (`A` = 1 … `Z` = 26, `AA` = 27, …).

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A single cell address (e.g. `B12`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (1-based)
    pub row: u32,
    /// Column index (1-based, A=1)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Column letters must be upper case; absolute markers (`$`) are not
    /// part of the notation used by the linter.
    ///
    /// # Examples
    /// ```
    /// use timetable_lint_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B12").unwrap();
    /// assert_eq!(addr.row, 12);
    /// assert_eq!(addr.col, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }

        Ok(Self { row, col })
    }

    /// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA)
    ///
    /// Index 0 has no letter form and yields an empty string.
    pub fn column_to_letters(col: u32) -> String {
        let mut result = Vec::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            result.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        result.reverse();
        String::from_utf8(result).unwrap_or_default()
    }

    /// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col
                .checked_mul(26)
                .and_then(|v| v.checked_add(c as u32 - 'A' as u32 + 1))
                .ok_or_else(|| Error::InvalidAddress(format!("column '{}' too large", letters)))?;
        }

        if col > MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
        }

        Ok(col)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular block of cells, anchored at its top-left cell
///
/// `num_rows` and `num_cols` are always at least 1; a single cell has both
/// set to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top row (1-based)
    pub row: u32,
    /// Left column (1-based)
    pub col: u32,
    /// Height in rows
    pub num_rows: u32,
    /// Width in columns
    pub num_cols: u32,
}

impl CellRange {
    /// Create a range from its origin and span
    pub fn new(row: u32, col: u32, num_rows: u32, num_cols: u32) -> Self {
        debug_assert!(row >= 1 && col >= 1, "ranges are 1-based");
        debug_assert!(num_rows >= 1 && num_cols >= 1, "ranges are never empty");
        Self {
            row,
            col,
            num_rows,
            num_cols,
        }
    }

    /// Create a range spanning two corners, in any order
    pub fn from_corners(a: CellAddress, b: CellAddress) -> Self {
        let (top, bottom) = if a.row <= b.row { (a.row, b.row) } else { (b.row, a.row) };
        let (left, right) = if a.col <= b.col { (a.col, b.col) } else { (b.col, a.col) };
        Self::new(top, left, bottom - top + 1, right - left + 1)
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self::new(addr.row, addr.col, 1, 1)
    }

    /// Decode `<col><row>:<col><row>` notation
    ///
    /// Exactly two endpoints are required; a single cell is written with the
    /// same endpoint twice (`C3:C3`).
    ///
    /// # Examples
    /// ```
    /// use timetable_lint_core::CellRange;
    ///
    /// let range = CellRange::decode("B2:D4").unwrap();
    /// assert_eq!((range.row, range.col, range.num_rows, range.num_cols), (2, 2, 3, 3));
    /// assert!(CellRange::decode("B2").is_err());
    /// ```
    pub fn decode(notation: &str) -> Result<Self> {
        let notation = notation.trim();
        let mut endpoints = notation.split(':');

        let (Some(start), Some(end), None) = (endpoints.next(), endpoints.next(), endpoints.next())
        else {
            return Err(Error::InvalidRange(format!(
                "expected two endpoints in '{}'",
                notation
            )));
        };

        let start = CellAddress::parse(start)?;
        let end = CellAddress::parse(end)?;
        Ok(Self::from_corners(start, end))
    }

    /// Encode as canonical two-endpoint notation
    ///
    /// Single cells still render both endpoints (`A1:A1`).
    pub fn encode(&self) -> String {
        format!("{}:{}", self.start(), self.end())
    }

    /// Top-left cell
    pub fn start(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }

    /// Bottom-right cell
    pub fn end(&self) -> CellAddress {
        CellAddress::new(self.end_row(), self.end_col())
    }

    /// Last row covered (inclusive)
    pub fn end_row(&self) -> u32 {
        self.row + self.num_rows - 1
    }

    /// Last column covered (inclusive)
    pub fn end_col(&self) -> u32 {
        self.col + self.num_cols - 1
    }

    /// Check if a cell is within this range
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.row && row <= self.end_row() && col >= self.col && col <= self.end_col()
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.row <= other.end_row()
            && self.end_row() >= other.row
            && self.col <= other.end_col()
            && self.end_col() >= other.col
    }

    /// Sub-range at a 0-based offset from this range's top-left cell
    pub fn offset(&self, row_offset: u32, col_offset: u32, num_rows: u32, num_cols: u32) -> Self {
        Self::new(self.row + row_offset, self.col + col_offset, num_rows, num_cols)
    }

    /// Absolute address of the cell at a 0-based offset inside this range
    pub fn cell(&self, row_offset: u32, col_offset: u32) -> CellAddress {
        CellAddress::new(self.row + row_offset, self.col + col_offset)
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.num_rows as u64 * self.num_cols as u64
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.row,
            current_col: self.col,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u32,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end_row() {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);

        self.current_col += 1;
        if self.current_col > self.range.end_col() {
            self.current_col = self.range.col;
            self.current_row += 1;
        }

        Some(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(1), "A");
        assert_eq!(CellAddress::column_to_letters(2), "B");
        assert_eq!(CellAddress::column_to_letters(26), "Z");
        assert_eq!(CellAddress::column_to_letters(27), "AA");
        assert_eq!(CellAddress::column_to_letters(28), "AB");
        assert_eq!(CellAddress::column_to_letters(52), "AZ");
        assert_eq!(CellAddress::column_to_letters(702), "ZZ");
        assert_eq!(CellAddress::column_to_letters(703), "AAA");
        assert_eq!(CellAddress::column_to_letters(0), "");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellAddress::letters_to_column("AB").unwrap(), 28);
        assert_eq!(CellAddress::letters_to_column("ZZ").unwrap(), 702);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16384);

        assert!(CellAddress::letters_to_column("a").is_err());
        assert!(CellAddress::letters_to_column("XFE").is_err());
    }

    #[test]
    fn test_column_codec_is_bijective_up_to_zz() {
        for col in 1..=702 {
            let letters = CellAddress::column_to_letters(col);
            assert_eq!(CellAddress::letters_to_column(&letters).unwrap(), col);
        }
    }

    #[test]
    fn test_cell_address_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(1, 1));
        assert_eq!(CellAddress::parse("C100").unwrap(), CellAddress::new(100, 3));
        assert_eq!(CellAddress::parse("AB7").unwrap(), CellAddress::new(7, 28));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("a1").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert!(CellAddress::parse("A99999999999").is_err());
    }

    #[test]
    fn test_decode_range() {
        let range = CellRange::decode("B2:D10").unwrap();
        assert_eq!(range, CellRange::new(2, 2, 9, 3));

        let single = CellRange::decode("C3:C3").unwrap();
        assert_eq!(single, CellRange::new(3, 3, 1, 1));

        // Corners given bottom-right first are normalized
        let swapped = CellRange::decode("D10:B2").unwrap();
        assert_eq!(swapped, range);
    }

    #[test]
    fn test_decode_range_requires_two_endpoints() {
        assert!(matches!(CellRange::decode("A1"), Err(Error::InvalidRange(_))));
        assert!(matches!(
            CellRange::decode("A1:B2:C3"),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            CellRange::decode("A1:2"),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_encode_range() {
        assert_eq!(CellRange::new(1, 1, 1, 1).encode(), "A1:A1");
        assert_eq!(CellRange::new(4, 2, 3, 2).encode(), "B4:C6");
        assert_eq!(CellRange::new(1, 27, 2, 1).to_string(), "AA1:AA2");
    }

    #[test]
    fn test_offset_and_contains() {
        let range = CellRange::decode("B2:H20").unwrap();
        let sub = range.offset(1, 2, 3, 4);
        assert_eq!(sub, CellRange::new(3, 4, 3, 4));
        assert_eq!(range.cell(0, 0), CellAddress::new(2, 2));

        assert!(range.contains(2, 2));
        assert!(range.contains(20, 8));
        assert!(!range.contains(1, 2));
        assert!(!range.contains(21, 8));
    }

    #[test]
    fn test_cell_range_iterator() {
        let cells: Vec<_> = CellRange::decode("A1:B2").unwrap().cells().collect();

        assert_eq!(
            cells,
            vec![
                CellAddress::new(1, 1),
                CellAddress::new(1, 2),
                CellAddress::new(2, 1),
                CellAddress::new(2, 2),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            row in 1u32..100_000,
            col in 1u32..16_000,
            num_rows in 1u32..1_000,
            num_cols in 1u32..300,
        ) {
            let range = CellRange::new(row, col, num_rows, num_cols);
            prop_assert_eq!(CellRange::decode(&range.encode()).unwrap(), range);
        }
    }
}
