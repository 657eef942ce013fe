//! Subject cells: `<name> (<type>)`

use indexmap::IndexSet;
use lazy_regex::{lazy_regex, Lazy, Regex};
use timetable_lint_core::CellRange;

use crate::dataset::{FieldKind, ReferenceDataset};
use crate::fuzzy::{self, EditCosts};
use crate::warning::Warning;

/// Accepted class types
pub const SUBJECT_TYPES: [&str; 3] = ["lec", "tut", "lab"];

static SUBJECT: Lazy<Regex> =
    lazy_regex!(r"^([a-zA-Zа-яА-ЯёЁ 0-9\-:,.&?]+\S)\s*(?:\((.+)\))?$");

/// A parsed subject cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub kind: Option<String>,
}

/// Check one subject cell of the schedule entry at `at`
///
/// Names missing from the dataset are recorded in `unknown` and reported
/// with the closest known subject, if there is one.
pub fn lint_subject(
    value: &str,
    at: &CellRange,
    dataset: &ReferenceDataset,
    costs: &EditCosts,
    unknown: &mut IndexSet<String>,
    warnings: &mut Vec<Warning>,
) -> Option<Subject> {
    let Some(caps) = SUBJECT.captures(value) else {
        warnings.push(Warning::at_range(
            format!(
                "Subject with wrong format: `{}`, should be `subject (type)`",
                value
            ),
            at,
        ));
        return None;
    };

    let name = caps.get(1).map_or("", |m| m.as_str());
    let kind = caps.get(2).map(|m| m.as_str());

    if !dataset.contains(FieldKind::Subjects, name) {
        let mut content = format!("Unknown subject '{}'", name);
        let candidates = dataset.field(FieldKind::Subjects).iter().map(String::as_str);
        if let Some(suggestion) = fuzzy::nearest(name, candidates, costs) {
            content.push_str(&format!(" (did you mean '{}'?)", suggestion));
        }
        warnings.push(Warning::at_range(content, at));
        unknown.insert(name.to_string());
    }

    if let Some(kind) = kind.filter(|k| !SUBJECT_TYPES.contains(k)) {
        warnings.push(Warning::at_range(
            format!(
                "Unknown subject type `{}`. Allowed types: {}",
                kind,
                SUBJECT_TYPES
                    .iter()
                    .map(|t| format!("`{}`", t))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            at,
        ));
    }

    Some(Subject {
        name: name.to_string(),
        kind: kind.map(str::to_string),
    })
}
