//! Named range definitions
//!
//! A named range binds a workbook-wide, case-insensitive name to a block of
//! cells on one sheet. The reference dataset is located this way.

use std::collections::HashMap;

use crate::cell::CellRange;

/// A named range definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRange {
    /// The name as it was defined (lookups ignore case)
    pub name: String,
    /// Index of the sheet the range lives on
    pub sheet: usize,
    /// The cells the name refers to
    pub range: CellRange,
}

impl NamedRange {
    /// Create a new named range
    pub fn new(name: impl Into<String>, sheet: usize, range: CellRange) -> Self {
        Self {
            name: name.into(),
            sheet,
            range,
        }
    }
}

/// Collection of named ranges with case-insensitive lookup
#[derive(Debug, Default, Clone)]
pub struct NamedRangeCollection {
    ranges: HashMap<String, NamedRange>,
}

impl NamedRangeCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(name: &str) -> String {
        name.to_lowercase()
    }

    /// Define or redefine a named range, returning the previous definition
    pub fn define(&mut self, range: NamedRange) -> Option<NamedRange> {
        let key = Self::make_key(&range.name);
        self.ranges.insert(key, range)
    }

    /// Get a named range by name
    pub fn get(&self, name: &str) -> Option<&NamedRange> {
        self.ranges.get(&Self::make_key(name))
    }

    /// Get a named range mutably
    pub fn get_mut(&mut self, name: &str) -> Option<&mut NamedRange> {
        self.ranges.get_mut(&Self::make_key(name))
    }

    /// Remove a named range
    pub fn remove(&mut self, name: &str) -> Option<NamedRange> {
        self.ranges.remove(&Self::make_key(name))
    }

    /// Check if a name is defined
    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(&Self::make_key(name))
    }

    /// Iterate over all named ranges
    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.ranges.values()
    }

    /// Get the number of named ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
