//! Point lookup from a cell to the merged region covering it

use ahash::AHashMap;
use timetable_lint_core::{CellRange, Result};

/// Maps every covered `(row, col)` to its merged region
///
/// Built once per schedule pass; construction touches every covered cell,
/// lookups are a single hash probe.
#[derive(Debug, Default, Clone)]
pub struct MergedRegionIndex {
    regions: Vec<CellRange>,
    cells: AHashMap<(u32, u32), usize>,
}

impl MergedRegionIndex {
    /// Index a list of merged regions
    pub fn build(regions: &[CellRange]) -> Self {
        let covered: usize = regions.iter().map(|r| r.cell_count() as usize).sum();
        let mut cells = AHashMap::with_capacity(covered);

        for (i, region) in regions.iter().enumerate() {
            for addr in region.cells() {
                cells.insert((addr.row, addr.col), i);
            }
        }

        Self {
            regions: regions.to_vec(),
            cells,
        }
    }

    /// Index merged regions given in A1 range notation
    ///
    /// Fails on the first notation that is not a valid two-endpoint range.
    pub fn from_notations<S: AsRef<str>>(notations: &[S]) -> Result<Self> {
        let regions = notations
            .iter()
            .map(|n| CellRange::decode(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::build(&regions))
    }

    /// The merged region covering a 1-based cell, if any
    pub fn lookup(&self, row: u32, col: u32) -> Option<&CellRange> {
        self.cells.get(&(row, col)).map(|&i| &self.regions[i])
    }

    /// Number of indexed regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no regions are indexed
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
