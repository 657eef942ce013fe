//! Top-level lint operations over one workbook
//!
//! A [`LintSession`] owns the workbook, the memoized reference dataset, the
//! staging cache and the unknown-value accumulators of the last schedule
//! pass. Every operation targets the sheet that was active when the session
//! was created.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use indexmap::IndexSet;
use once_cell::unsync::OnceCell;
use serde::{Serialize, Serializer};
use timetable_lint_core::{CellAddress, CellRange, CellValue, Workbook, Worksheet};

use crate::cache::{MemoryCache, StagingCache};
use crate::dataset::{header_column, layout, FieldKind, ReferenceDataset};
use crate::error::{LintError, LintResult};
use crate::fuzzy::EditCosts;
use crate::locator::{find_end_of_schedule_column, GridLocator};
use crate::merge_index::MergedRegionIndex;
use crate::modifier::Modifier;
use crate::segmenter::segment;
use crate::validate::{fix_spacing, lint_course, lint_group, lint_hygiene, lint_location, lint_subject};
use crate::warning::{stamp, Warning};

const NO_DATASET: &str = "No reference dataset found";

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Named range holding the reference dataset
    pub reference_name: String,
    /// Lifetime of staged unknown values
    pub cache_ttl: Duration,
    pub unknown_subjects_key: String,
    pub unknown_locations_key: String,
    /// Joins staged values into one cache entry
    pub cache_separator: String,
    /// Costs used for subject suggestions
    pub edit_costs: EditCosts,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            reference_name: "Settings".to_string(),
            cache_ttl: Duration::from_secs(100),
            unknown_subjects_key: "unknownSubjects".to_string(),
            unknown_locations_key: "unknownLocations".to_string(),
            cache_separator: "\r\n".to_string(),
            edit_costs: EditCosts::default(),
        }
    }
}

/// Modifiers parsed from one schedule entry's location cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryModifiers {
    #[serde(serialize_with = "serialize_range")]
    pub range: CellRange,
    pub modifiers: Vec<Modifier>,
}

fn serialize_range<S: Serializer>(range: &CellRange, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&range.encode())
}

/// Result of a full schedule pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleLint {
    pub warnings: Vec<Warning>,
    pub modifiers: Vec<EntryModifiers>,
}

/// Lint state for one workbook
pub struct LintSession<C: StagingCache = MemoryCache> {
    workbook: Workbook,
    target_sheet: usize,
    target_range: Option<CellRange>,
    options: SessionOptions,
    dataset: OnceCell<ReferenceDataset>,
    cache: C,
    unknown_subjects: IndexSet<String>,
    unknown_locations: IndexSet<String>,
}

impl LintSession<MemoryCache> {
    /// Session with default options and an in-memory cache
    pub fn new(workbook: Workbook) -> Self {
        Self::with_cache(workbook, MemoryCache::new(), SessionOptions::default())
    }
}

impl<C: StagingCache> LintSession<C> {
    pub fn with_cache(workbook: Workbook, cache: C, options: SessionOptions) -> Self {
        let target_sheet = workbook.active_sheet();
        Self {
            workbook,
            target_sheet,
            target_range: None,
            options,
            dataset: OnceCell::new(),
            cache,
            unknown_subjects: IndexSet::new(),
            unknown_locations: IndexSet::new(),
        }
    }

    /// Restrict header, hygiene and fix operations to `range`
    ///
    /// Without an override they cover the target sheet's data range.
    pub fn with_target_range(mut self, range: CellRange) -> Self {
        self.target_range = Some(range);
        self
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Index of the sheet every operation works on
    pub fn target_sheet(&self) -> usize {
        self.target_sheet
    }

    /// Unknown subjects found by the last schedule pass, in discovery order
    pub fn unknown_subjects(&self) -> &IndexSet<String> {
        &self.unknown_subjects
    }

    /// Unknown locations found by the last schedule pass, in discovery order
    pub fn unknown_locations(&self) -> &IndexSet<String> {
        &self.unknown_locations
    }

    /// Sheet id and block of the reference dataset, when it exists
    pub fn reference_dataset_location(&self) -> Option<(u32, CellRange)> {
        let named = self.workbook.named_range(&self.options.reference_name)?;
        let sheet = self.workbook.worksheet(named.sheet)?;
        Some((sheet.id(), named.range))
    }

    // ==================== Header ====================

    /// Check the course row and the group row of the working range
    pub fn lint_header(&self) -> LintResult<Vec<Warning>> {
        let started = Instant::now();
        let sheet = target(&self.workbook, self.target_sheet)?;
        let range = self.working_range(sheet);
        let mut warnings = Vec::new();

        match load_dataset(&self.dataset, &self.workbook, &self.options.reference_name) {
            None => warnings.push(Warning::new(NO_DATASET)),
            Some(dataset) => {
                let header = sheet.values(&range.offset(0, 0, range.num_rows.min(2), range.num_cols));

                if let Some(courses) = header.first() {
                    for (col, value) in courses.iter().enumerate() {
                        if value.is_blank() {
                            continue;
                        }
                        let cell = range.cell(0, col as u32);
                        lint_course(&value.as_text(), cell, dataset, &mut warnings);
                    }
                }

                if let Some(groups) = header.get(1) {
                    for (col, value) in groups.iter().enumerate() {
                        let Some(text) = value.as_str().filter(|s| !s.is_empty()) else {
                            continue;
                        };
                        lint_group(text, range.cell(1, col as u32), dataset, &mut warnings);
                    }
                }
            }
        }

        stamp(&mut warnings, sheet.id());
        tracing::debug!("Header linting took {:?}", started.elapsed());
        Ok(warnings)
    }

    // ==================== Schedule ====================

    /// Lint every schedule entry of every grid
    ///
    /// Clears the unknown-value accumulators first and stages whatever is
    /// unknown at the end in the cache.
    pub fn lint_schedule(&mut self) -> LintResult<ScheduleLint> {
        let started = Instant::now();
        self.unknown_subjects.clear();
        self.unknown_locations.clear();

        let sheet = target(&self.workbook, self.target_sheet)?;
        let mut result = ScheduleLint::default();

        let Some(dataset) = load_dataset(&self.dataset, &self.workbook, &self.options.reference_name)
        else {
            result.warnings.push(Warning::new(NO_DATASET));
            stamp(&mut result.warnings, sheet.id());
            return Ok(result);
        };

        let working = schedule_range(sheet, &mut result.warnings);
        let values = sheet.values(&working);
        let grids = GridLocator::new(&values, working).build_grids(&mut result.warnings);
        let merges = MergedRegionIndex::build(&sheet.merged_regions_in(&working));

        for grid in &grids {
            let grid_values = sheet.values(grid);
            for entry in segment(grid, &grid_values, &merges) {
                tracing::trace!("Linting schedule entry {}", entry.offset.encode());

                if !entry.subject().is_blank() {
                    lint_subject(
                        &entry.subject().as_text(),
                        &entry.offset,
                        dataset,
                        &self.options.edit_costs,
                        &mut self.unknown_subjects,
                        &mut result.warnings,
                    );
                }

                if !entry.location().is_blank() {
                    let modifiers = lint_location(
                        &entry.location().as_text(),
                        &entry.offset,
                        dataset,
                        &mut self.unknown_locations,
                        &mut result.warnings,
                    );
                    if !modifiers.is_empty() {
                        result.modifiers.push(EntryModifiers {
                            range: entry.offset,
                            modifiers,
                        });
                    }
                }
            }
        }

        stage(
            &mut self.cache,
            &self.options,
            &self.options.unknown_subjects_key,
            &self.unknown_subjects,
        );
        stage(
            &mut self.cache,
            &self.options,
            &self.options.unknown_locations_key,
            &self.unknown_locations,
        );

        stamp(&mut result.warnings, sheet.id());
        tracing::debug!("Whole schedule linting took {:?}", started.elapsed());
        Ok(result)
    }

    /// Select every schedule grid of the target sheet
    pub fn select_grids(&mut self) -> LintResult<Vec<Warning>> {
        let sheet = target(&self.workbook, self.target_sheet)?;
        let gid = sheet.id();
        let mut warnings = Vec::new();

        let working = schedule_range(sheet, &mut warnings);
        let values = sheet.values(&working);
        let grids = GridLocator::new(&values, working).build_grids(&mut warnings);

        if grids.is_empty() {
            warnings.push(Warning::new("No schedule grids found"));
        } else {
            self.workbook.activate(self.target_sheet, grids)?;
        }

        stamp(&mut warnings, gid);
        Ok(warnings)
    }

    // ==================== Hygiene ====================

    /// Run the text hygiene checks on every text cell of the working range
    pub fn lint_common(&self) -> LintResult<Vec<Warning>> {
        let started = Instant::now();
        let sheet = target(&self.workbook, self.target_sheet)?;
        let range = self.working_range(sheet);
        tracing::debug!("Linting common {}", range.encode());

        let mut warnings = Vec::new();
        for (row, values) in sheet.values(&range).iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                let Some(text) = value.as_str().filter(|s| !s.is_empty()) else {
                    continue;
                };
                lint_hygiene(text, range.cell(row as u32, col as u32), &mut warnings);
            }
        }

        stamp(&mut warnings, sheet.id());
        tracing::debug!("Common linting took {:?}", started.elapsed());
        Ok(warnings)
    }

    /// Rewrite the spacing of every text cell in the working range
    ///
    /// Cells are written row by row, left to right, and only when the fix
    /// changes them. Returns the number of cells written.
    pub fn fix_spaces(&mut self) -> LintResult<usize> {
        let sheet = target(&self.workbook, self.target_sheet)?;
        let range = self.working_range(sheet);

        let mut changes: Vec<(CellAddress, String)> = Vec::new();
        for (row, values) in sheet.values(&range).iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                let Some(text) = value.as_str().filter(|s| !s.is_empty()) else {
                    continue;
                };
                if let Cow::Owned(fixed) = fix_spacing(text) {
                    changes.push((range.cell(row as u32, col as u32), fixed));
                }
            }
        }

        let sheet = self
            .workbook
            .worksheet_mut(self.target_sheet)
            .ok_or(LintError::SheetMissing(self.target_sheet))?;
        for (cell, fixed) in &changes {
            if fixed.is_empty() {
                sheet.clear_cell_at(cell.row, cell.col);
            } else {
                sheet.set_cell_value_at(cell.row, cell.col, CellValue::string(fixed.as_str()))?;
            }
        }

        tracing::debug!("Fixed spacing in {} cells", changes.len());
        Ok(changes.len())
    }

    // ==================== Reference dataset ====================

    /// Append the staged unknown subjects to the dataset's `subjects` column
    pub fn promote_unknown_subjects(&mut self) -> LintResult<Vec<Warning>> {
        let key = self.options.unknown_subjects_key.clone();
        self.promote(FieldKind::Subjects, &key)
    }

    /// Append the staged unknown locations to the dataset's `locations` column
    pub fn promote_unknown_locations(&mut self) -> LintResult<Vec<Warning>> {
        let key = self.options.unknown_locations_key.clone();
        self.promote(FieldKind::Locations, &key)
    }

    fn promote(&mut self, kind: FieldKind, key: &str) -> LintResult<Vec<Warning>> {
        let gid = target(&self.workbook, self.target_sheet)?.id();
        let name = self.options.reference_name.clone();
        let mut warnings = Vec::new();

        let Some(staged) = self.cache.get(key) else {
            warnings.push(Warning::new(format!(
                "No cached unknown {} to promote",
                kind.header()
            )));
            stamp(&mut warnings, gid);
            return Ok(warnings);
        };

        let Some((sheet_index, named, col)) = header_column(&self.workbook, &name, kind) else {
            let content = if self.workbook.named_range(&name).is_none() {
                NO_DATASET.to_string()
            } else {
                format!("No `{}` column in reference dataset", kind.header())
            };
            warnings.push(Warning::new(content));
            stamp(&mut warnings, gid);
            return Ok(warnings);
        };

        let values: Vec<&str> = staged.split(self.options.cache_separator.as_str()).collect();
        tracing::info!("Unknown {} to add: {:?}", kind.header(), values);

        let sheet = self
            .workbook
            .worksheet_mut(sheet_index)
            .ok_or(LintError::SheetMissing(sheet_index))?;

        let column = named.offset(0, col, named.num_rows, 1);
        let row_offset = sheet
            .values(&column)
            .iter()
            .rposition(|row| row.first().is_some_and(|v| !v.is_blank()))
            .map_or(0, |i| i as u32 + 1);
        let block = named.offset(row_offset, col, values.len() as u32, 1);

        for (i, value) in values.iter().enumerate() {
            sheet.set_cell_value_at(block.row + i as u32, block.col, *value)?;
        }

        if block.end_row() > named.end_row() {
            let extended = CellRange::new(
                named.row,
                named.col,
                block.end_row() - named.row + 1,
                named.num_cols,
            );
            self.workbook.define_name(&name, sheet_index, extended)?;
        }
        self.workbook.activate(sheet_index, vec![block])?;

        stamp(&mut warnings, gid);
        Ok(warnings)
    }

    /// Select the reference dataset block
    pub fn go_to_reference_dataset(&mut self) -> LintResult<Vec<Warning>> {
        let gid = target(&self.workbook, self.target_sheet)?.id();
        let mut warnings = Vec::new();

        match self.workbook.named_range(&self.options.reference_name) {
            Some(named) => {
                let (sheet, range) = (named.sheet, named.range);
                self.workbook.activate(sheet, vec![range])?;
            }
            None => warnings.push(Warning::new(NO_DATASET)),
        }

        stamp(&mut warnings, gid);
        Ok(warnings)
    }

    /// Add an empty reference dataset sheet after the existing sheets
    pub fn create_reference_dataset(&mut self) -> LintResult<Vec<Warning>> {
        let gid = target(&self.workbook, self.target_sheet)?.id();
        let name = self.options.reference_name.clone();
        let mut warnings = Vec::new();

        if self.workbook.named_range(&name).is_some() {
            warnings.push(Warning::new("Settings already exist"));
            stamp(&mut warnings, gid);
            return Ok(warnings);
        }

        let sheet_name = unused_sheet_name(&self.workbook, &name);
        let index = self.workbook.add_worksheet_with_name(&sheet_name)?;
        let sheet = self
            .workbook
            .worksheet_mut(index)
            .ok_or(LintError::SheetMissing(index))?;

        let title = CellRange::decode(layout::TITLE)?;
        sheet.merge_cells(&title)?;
        sheet.set_cell_value_at(title.row, title.col, name.as_str())?;

        let headers = CellRange::decode(layout::HEADERS)?;
        for (i, kind) in FieldKind::ALL.iter().enumerate() {
            sheet.set_cell_value_at(headers.row, headers.col + i as u32, kind.header())?;
        }

        let range = CellRange::decode(layout::RANGE)?;
        sheet.set_dimensions(range.end_row(), range.end_col());
        self.workbook.define_name(&name, index, range)?;
        self.workbook.activate(index, vec![range])?;
        tracing::info!("Created reference dataset on sheet '{}'", sheet_name);

        stamp(&mut warnings, gid);
        Ok(warnings)
    }

    // ==================== Navigation ====================

    /// Select a block of the target sheet given as `B3` or `B3:C5`
    pub fn focus_on_range(&mut self, notation: &str) -> LintResult<()> {
        tracing::debug!("Focusing on range {}", notation);
        let range = if notation.contains(':') {
            CellRange::decode(notation)?
        } else {
            CellRange::single(CellAddress::parse(notation.trim())?)
        };
        self.workbook.activate(self.target_sheet, vec![range])?;
        Ok(())
    }

    fn working_range(&self, sheet: &Worksheet) -> CellRange {
        self.target_range.unwrap_or_else(|| sheet.data_range())
    }
}

fn target(workbook: &Workbook, index: usize) -> LintResult<&Worksheet> {
    workbook
        .worksheet(index)
        .ok_or(LintError::SheetMissing(index))
}

/// Memoize the dataset on first successful load
fn load_dataset<'a>(
    cell: &'a OnceCell<ReferenceDataset>,
    workbook: &Workbook,
    name: &str,
) -> Option<&'a ReferenceDataset> {
    if let Some(dataset) = cell.get() {
        return Some(dataset);
    }
    let loaded = ReferenceDataset::load(workbook, name)?;
    Some(cell.get_or_init(|| loaded))
}

/// Rows 1..=max_rows, columns up to the end-of-schedule marker
///
/// Falls back to the full sheet width when the marker is missing or sits in
/// the first column.
fn schedule_range(sheet: &Worksheet, warnings: &mut Vec<Warning>) -> CellRange {
    let header_range = CellRange::new(1, 1, 1, sheet.last_column().max(1));
    let header = sheet.values(&header_range).into_iter().next().unwrap_or_default();

    let width = match find_end_of_schedule_column(&header, &header_range, warnings) {
        Some(col) if col > 0 => col,
        _ => sheet.max_columns(),
    };
    CellRange::new(1, 1, sheet.max_rows().max(1), width.max(1))
}

fn stage<C: StagingCache>(cache: &mut C, options: &SessionOptions, key: &str, values: &IndexSet<String>) {
    if values.is_empty() {
        tracing::debug!("Nothing to stage under {}", key);
        return;
    }
    let joined = values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&options.cache_separator);
    tracing::info!("Staging {} unknown values under {}", values.len(), key);
    cache.put(key, &joined, options.cache_ttl);
}

fn unused_sheet_name(workbook: &Workbook, base: &str) -> String {
    if workbook.worksheet_by_name(base).is_none() {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", base, n))
        .find(|candidate| workbook.worksheet_by_name(candidate).is_none())
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schedule() -> Workbook {
        let mut wb = Workbook::new();
        let sheet = wb.worksheet_mut(0).unwrap();
        for (cell, value) in [
            ("B1", "BS - Year 1"),
            ("C1", "BS - Year 1"),
            ("D1", "-"),
            ("B2", "B21-01 (30)"),
            ("C2", "B21-02"),
            ("A3", "MONDAY"),
            ("A4", "9:00-10:30"),
            ("B4", "Philosophy (lec)"),
            ("B5", "Ivanov"),
            ("B6", "313"),
        ] {
            sheet.set_cell_value(cell, value).unwrap();
        }
        let settings = wb.add_worksheet_with_name("Settings").unwrap();
        let sheet = wb.worksheet_mut(settings).unwrap();
        for (cell, value) in [
            ("A2", "subjects"),
            ("B2", "groups"),
            ("C2", "courses"),
            ("D2", "locations"),
            ("A3", "Philosophy"),
            ("B3", "B21-01"),
            ("C3", "BS - Year 1"),
            ("D3", "108"),
        ] {
            sheet.set_cell_value(cell, value).unwrap();
        }
        wb.define_name("Settings", settings, CellRange::decode("A2:F10").unwrap())
            .unwrap();
        wb
    }

    #[test]
    fn test_header() {
        let session = LintSession::new(schedule());
        let warnings = session.lint_header().unwrap();

        let messages: Vec<_> = warnings.iter().map(|w| w.content.as_str()).collect();
        assert_eq!(messages, vec!["Unknown group B21-02"]);
        assert_eq!(warnings[0].range.as_deref(), Some("C2"));
        assert_eq!(warnings[0].gid.as_deref(), Some("0"));
    }

    #[test]
    fn test_missing_dataset() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0).unwrap().set_cell_value("A1", "x").unwrap();
        let mut session = LintSession::new(wb);

        let header = session.lint_header().unwrap();
        assert_eq!(header[0].content, NO_DATASET);

        let schedule = session.lint_schedule().unwrap();
        assert_eq!(schedule.warnings.len(), 1);
        assert_eq!(schedule.warnings[0].content, NO_DATASET);
    }

    #[test]
    fn test_schedule_stages_unknowns() {
        let mut session = LintSession::new(schedule());
        let result = session.lint_schedule().unwrap();

        let messages: Vec<_> = result.warnings.iter().map(|w| w.content.as_str()).collect();
        assert_eq!(messages, vec!["Unknown location '313'"]);
        assert_eq!(result.warnings[0].range.as_deref(), Some("B4:B6"));
        assert_eq!(session.cache().get("unknownLocations").as_deref(), Some("313"));
        assert_eq!(session.cache().get("unknownSubjects"), None);
    }

    #[test]
    fn test_empty_sheet_degrades_to_warnings() {
        let mut wb = Workbook::new();
        let settings = wb.add_worksheet_with_name("Settings").unwrap();
        wb.worksheet_mut(settings)
            .unwrap()
            .set_cell_value("A2", "subjects")
            .unwrap();
        wb.define_name("Settings", settings, CellRange::decode("A2:F10").unwrap())
            .unwrap();
        let mut session = LintSession::new(wb);

        let warnings = session.select_grids().unwrap();
        let messages: Vec<_> = warnings.iter().map(|w| w.content.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "No end of schedule column found",
                "No time columns found",
                "No day rows found",
                "No schedule grids found",
            ]
        );

        let result = session.lint_schedule().unwrap();
        assert_eq!(result.warnings.len(), 3);
        assert!(result.modifiers.is_empty());
        assert!(session.unknown_subjects().is_empty());
    }

    #[test]
    fn test_focus_on_range() {
        let mut session = LintSession::new(schedule());

        session.focus_on_range("B3").unwrap();
        assert_eq!(
            session.workbook().worksheet(0).unwrap().active_range(),
            Some(CellRange::new(3, 2, 1, 1))
        );
        assert!(session.focus_on_range("B3:").is_err());
    }

    #[test]
    fn test_unused_sheet_name() {
        let mut wb = Workbook::new();
        assert_eq!(unused_sheet_name(&wb, "Settings"), "Settings");
        wb.add_worksheet_with_name("Settings").unwrap();
        assert_eq!(unused_sheet_name(&wb, "Settings"), "Settings (2)");
    }
}
