//! Course cells of the first header row

use timetable_lint_core::CellAddress;

use crate::dataset::{FieldKind, ReferenceDataset};
use crate::warning::Warning;

/// Header value meaning "this column belongs to no course"
pub const NO_COURSE: &str = "-";

/// Check one course cell; blank cells and [`NO_COURSE`] are accepted
pub fn lint_course(value: &str, cell: CellAddress, dataset: &ReferenceDataset, warnings: &mut Vec<Warning>) {
    if value.is_empty() || value == NO_COURSE {
        return;
    }
    if !dataset.contains(FieldKind::Courses, value) {
        warnings.push(Warning::at_cell(format!("Unknown course {}", value), cell));
    }
}
