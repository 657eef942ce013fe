//! The reference dataset ("Settings")
//!
//! A named range whose first row holds column headers. Columns headed by a
//! known field name list the accepted values of that field; any other column
//! is ignored.

use indexmap::IndexSet;
use timetable_lint_core::{CellRange, Workbook};

/// A column of the reference dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Subjects,
    Groups,
    Courses,
    Locations,
    Teachers,
}

impl FieldKind {
    /// All fields, in header order
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Subjects,
        FieldKind::Groups,
        FieldKind::Courses,
        FieldKind::Locations,
        FieldKind::Teachers,
    ];

    /// Recognise a header cell; exact and case-sensitive
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "subjects" => Some(FieldKind::Subjects),
            "groups" => Some(FieldKind::Groups),
            "courses" => Some(FieldKind::Courses),
            "locations" => Some(FieldKind::Locations),
            "teachers" => Some(FieldKind::Teachers),
            _ => None,
        }
    }

    /// The header text of this field
    pub fn header(&self) -> &'static str {
        match self {
            FieldKind::Subjects => "subjects",
            FieldKind::Groups => "groups",
            FieldKind::Courses => "courses",
            FieldKind::Locations => "locations",
            FieldKind::Teachers => "teachers",
        }
    }
}

/// Accepted values per field, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDataset {
    pub subjects: IndexSet<String>,
    pub groups: IndexSet<String>,
    pub courses: IndexSet<String>,
    pub locations: IndexSet<String>,
    pub teachers: IndexSet<String>,
}

impl ReferenceDataset {
    /// Read the dataset from the named range `name`
    ///
    /// Returns `None` when the name is not defined or points at a missing
    /// sheet. Values are read as displayed text; blank cells are skipped.
    pub fn load(workbook: &Workbook, name: &str) -> Option<Self> {
        let named = workbook.named_range(name)?;
        let sheet = workbook.worksheet(named.sheet)?;
        let values = sheet.values(&named.range);

        let mut dataset = Self::default();
        let Some(header) = values.first() else {
            return Some(dataset);
        };

        for (col, cell) in header.iter().enumerate() {
            let Some(kind) = FieldKind::from_header(&cell.as_text()) else {
                continue;
            };
            let set = dataset.field_mut(kind);
            for row in values.iter().skip(1) {
                if let Some(value) = row.get(col).filter(|v| !v.is_blank()) {
                    set.insert(value.as_text().into_owned());
                }
            }
        }

        tracing::debug!(
            "Loaded reference dataset: {} subjects, {} groups, {} courses, {} locations, {} teachers",
            dataset.subjects.len(),
            dataset.groups.len(),
            dataset.courses.len(),
            dataset.locations.len(),
            dataset.teachers.len()
        );
        Some(dataset)
    }

    /// Build a dataset directly from value lists
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (FieldKind, &'a [&'a str])>,
    {
        let mut dataset = Self::default();
        for (kind, values) in fields {
            dataset
                .field_mut(kind)
                .extend(values.iter().map(|v| v.to_string()));
        }
        dataset
    }

    /// The values of one field
    pub fn field(&self, kind: FieldKind) -> &IndexSet<String> {
        match kind {
            FieldKind::Subjects => &self.subjects,
            FieldKind::Groups => &self.groups,
            FieldKind::Courses => &self.courses,
            FieldKind::Locations => &self.locations,
            FieldKind::Teachers => &self.teachers,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut IndexSet<String> {
        match kind {
            FieldKind::Subjects => &mut self.subjects,
            FieldKind::Groups => &mut self.groups,
            FieldKind::Courses => &mut self.courses,
            FieldKind::Locations => &mut self.locations,
            FieldKind::Teachers => &mut self.teachers,
        }
    }

    /// Whether `value` is listed under `kind`
    pub fn contains(&self, kind: FieldKind, value: &str) -> bool {
        self.field(kind).contains(value)
    }
}

/// Layout of a freshly created reference sheet
pub(crate) mod layout {
    /// Title block, merged
    pub const TITLE: &str = "A1:F1";
    /// Header cells, one per field
    pub const HEADERS: &str = "A2:E2";
    /// The block the named range covers
    pub const RANGE: &str = "A2:F1002";
}

/// Column offset of `kind` inside the named range's header row
pub(crate) fn header_column(workbook: &Workbook, name: &str, kind: FieldKind) -> Option<(usize, CellRange, u32)> {
    let named = workbook.named_range(name)?;
    let sheet = workbook.worksheet(named.sheet)?;
    let header = sheet.values(&named.range.offset(0, 0, 1, named.range.num_cols));
    let col = header
        .first()?
        .iter()
        .position(|v| v.as_str() == Some(kind.header()))?;
    Some((named.sheet, named.range, col as u32))
}
