//! # timetable-lint
//!
//! Lint engine for university class-schedule spreadsheets.
//!
//! A schedule sheet holds a course row, a group row and, below them, grids
//! of three-row entries (subject, teacher, location) framed by day labels
//! and time-slot columns. This crate locates those grids, splits them into
//! entries, checks every field against a reference dataset and parses the
//! bracketed modifier language of location cells.
//!
//! ## Features
//!
//! - Grid location from day rows and time columns
//! - Merged-cell aware entry segmentation
//! - Subject, group, course and location validation with "did you mean"
//!   suggestions
//! - Text hygiene checks and an automatic spacing fix
//! - Staging of unknown values and their promotion into the reference dataset
//!
//! ## Example
//!
//! ```rust
//! use timetable_lint::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A1", "Math  (lec)").unwrap();
//!
//! let session = LintSession::new(workbook);
//! let warnings = session.lint_common().unwrap();
//! assert_eq!(warnings[0].content, "Multiple spaces found in cell A1");
//! ```

pub mod cache;
pub mod dataset;
pub mod error;
pub mod fuzzy;
pub mod locator;
pub mod merge_index;
pub mod modifier;
pub mod segmenter;
pub mod session;
pub mod validate;
pub mod warning;

pub use cache::{MemoryCache, StagingCache};
pub use dataset::{FieldKind, ReferenceDataset};
pub use error::{LintError, LintResult};
pub use fuzzy::EditCosts;
pub use locator::GridLocator;
pub use merge_index::MergedRegionIndex;
pub use modifier::{AdditionalModifier, AdditionalModifierKind, EventModifierKind, Modifier};
pub use segmenter::ScheduleEntry;
pub use session::{EntryModifiers, LintSession, ScheduleLint, SessionOptions};
pub use warning::Warning;

pub use timetable_lint_core::{CellAddress, CellRange, CellValue, Workbook, Worksheet};

/// Common imports
///
/// ```rust
/// use timetable_lint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CellAddress, CellRange, CellValue, FieldKind, LintError, LintResult, LintSession,
        MemoryCache, ReferenceDataset, ScheduleLint, SessionOptions, StagingCache, Warning,
        Workbook, Worksheet,
    };
}
