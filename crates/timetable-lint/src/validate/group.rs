//! Group cells of the second header row

use lazy_regex::{lazy_regex, Lazy, Regex};
use timetable_lint_core::CellAddress;

use crate::dataset::{FieldKind, ReferenceDataset};
use crate::warning::Warning;

static GROUP: Lazy<Regex> = lazy_regex!(r"^([a-zA-Zа-яА-ЯёЁ0-9\-]+)\s*(?:\((\d+)\))?$");

/// A parsed group header such as `B21-01 (30)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub code: String,
    /// Number of students, when given
    pub students: Option<u32>,
}

/// Check one group cell and return what it parsed to
pub fn lint_group(
    value: &str,
    cell: CellAddress,
    dataset: &ReferenceDataset,
    warnings: &mut Vec<Warning>,
) -> Option<Group> {
    let Some(caps) = GROUP.captures(value) else {
        warnings.push(Warning::at_cell(
            format!(
                "Group with wrong format: `{}`, should be `group (count of students)`",
                value
            ),
            cell,
        ));
        return None;
    };

    let code = caps.get(1).map_or("", |m| m.as_str());
    if !dataset.contains(FieldKind::Groups, code) {
        warnings.push(Warning::at_cell(format!("Unknown group {}", code), cell));
    }

    Some(Group {
        code: code.to_string(),
        students: caps.get(2).and_then(|m| m.as_str().parse().ok()),
    })
}
