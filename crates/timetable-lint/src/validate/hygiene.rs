//! Text hygiene checks that apply to every text cell
//!
//! These are independent of the schedule layout: the whole working range is
//! scanned, not just the grids.

use std::borrow::Cow;

use lazy_regex::{lazy_regex, Lazy, Regex};
use timetable_lint_core::CellAddress;

use crate::warning::Warning;

static CYRILLIC: Lazy<Regex> = lazy_regex!(r"[а-яА-ЯёЁ]");
static MULTIPLE_SPACES: Lazy<Regex> = lazy_regex!(r"\s{2,}");
static TRAILING_SPACE: Lazy<Regex> = lazy_regex!(r"\s$");
static LEADING_SPACE: Lazy<Regex> = lazy_regex!(r"^\s");
static NO_SPACE_BEFORE_BRACKET: Lazy<Regex> = lazy_regex!(r"(\S)([({<\[])");
static SPACE_AFTER_BRACKET: Lazy<Regex> = lazy_regex!(r"([({<\[])\s");

const BRACKETS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

/// Run every hygiene check on one text cell
pub fn lint_hygiene(value: &str, cell: CellAddress, warnings: &mut Vec<Warning>) {
    let a1 = cell.to_a1_string();
    let mut warn = |what: &str| {
        warnings.push(Warning::at_cell(format!("{} in cell {}", what, a1), cell));
    };

    if CYRILLIC.is_match(value) {
        warn("Cyrillic symbols found");
    }
    if TRAILING_SPACE.is_match(value) {
        warn("Trailing space found");
    } else if LEADING_SPACE.is_match(value) {
        warn("Leading space found");
    }
    if MULTIPLE_SPACES.is_match(value) {
        warn("Multiple spaces found");
    }
    if !check_brackets(value) {
        warn("Unclosed bracket");
    }
    if NO_SPACE_BEFORE_BRACKET.is_match(value) {
        warn("Space before bracket not found");
    }
    if SPACE_AFTER_BRACKET.is_match(value) {
        warn("Space after bracket found");
    }
}

/// Whether every bracket in `value` is closed by its own counterpart
///
/// Crossed pairs such as `(a[b)c]` and stray closers are unbalanced.
pub fn check_brackets(value: &str) -> bool {
    let mut stack = Vec::new();

    for c in value.chars() {
        if let Some(&(_, close)) = BRACKETS.iter().find(|(open, _)| *open == c) {
            stack.push(close);
        } else if BRACKETS.iter().any(|(_, close)| *close == c) && stack.pop() != Some(c) {
            return false;
        }
    }

    stack.is_empty()
}

/// Apply the spacing fixes in order
///
/// Trims the ends, collapses whitespace runs to one space, inserts a space
/// before an opening bracket that follows a non-space and removes the space
/// right after an opening bracket. Cyrillic text and unbalanced brackets are
/// left alone.
pub fn fix_spacing(value: &str) -> Cow<'_, str> {
    let trimmed = value.trim();
    let collapsed = MULTIPLE_SPACES.replace_all(trimmed, " ");
    let spaced = NO_SPACE_BEFORE_BRACKET.replace_all(&collapsed, "$1 $2").into_owned();
    let fixed = SPACE_AFTER_BRACKET.replace_all(&spaced, "$1").into_owned();

    if fixed == value {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(fixed)
    }
}
