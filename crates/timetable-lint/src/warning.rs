//! Lint warnings

use std::fmt;

use serde::Serialize;
use timetable_lint_core::{CellAddress, CellRange};

/// One content problem found during a lint pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Human readable message
    pub content: String,
    /// Where the problem is, in A1 notation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Id of the sheet the warning refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,
}

impl Warning {
    /// A warning without a location
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            range: None,
            gid: None,
        }
    }

    /// A warning about a block of cells (e.g. a schedule entry `B3:C5`)
    pub fn at_range(content: impl Into<String>, range: &CellRange) -> Self {
        Self {
            range: Some(range.encode()),
            ..Self::new(content)
        }
    }

    /// A warning about a single cell, addressed as `B3`
    pub fn at_cell(content: impl Into<String>, cell: CellAddress) -> Self {
        Self {
            range: Some(cell.to_a1_string()),
            ..Self::new(content)
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}: {}", range, self.content),
            None => write!(f, "{}", self.content),
        }
    }
}

/// Attach a sheet id to every warning
pub(crate) fn stamp(warnings: &mut [Warning], gid: u32) {
    let gid = gid.to_string();
    for warning in warnings {
        warning.gid = Some(gid.clone());
    }
}
