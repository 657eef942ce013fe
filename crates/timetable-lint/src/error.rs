//! Error types for timetable-lint

use thiserror::Error;

/// Result type alias using [`LintError`]
pub type LintResult<T> = std::result::Result<T, LintError>;

/// Structural faults that abort a top-level operation.
///
/// Content problems are never reported through this type; they become
/// [`Warning`](crate::Warning)s.
#[derive(Debug, Error)]
pub enum LintError {
    /// Host grid fault (bad range notation, missing sheet, ...)
    #[error(transparent)]
    Core(#[from] timetable_lint_core::Error),

    /// A sheet the session works on no longer exists
    #[error("Sheet {0} not found")]
    SheetMissing(usize),
}
