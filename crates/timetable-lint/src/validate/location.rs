//! Location cells: rooms plus bracketed modifiers

use indexmap::IndexSet;
use timetable_lint_core::CellRange;

use crate::dataset::{FieldKind, ReferenceDataset};
use crate::modifier::{parse_modifiers, split_location, Modifier};
use crate::warning::Warning;

/// Separator between alternative rooms of one entry
const ALTERNATIVE_SEPARATOR: char = '/';

/// Check the location cell of the schedule entry at `at`
///
/// Each `/`-separated room missing from the dataset is reported and recorded
/// in `unknown`. Returns the modifiers parsed from the cell's `[...]`
/// segments.
pub fn lint_location(
    value: &str,
    at: &CellRange,
    dataset: &ReferenceDataset,
    unknown: &mut IndexSet<String>,
    warnings: &mut Vec<Warning>,
) -> Vec<Modifier> {
    let (location, segments) = split_location(value);

    if location.is_empty() {
        warnings.push(Warning::at_range("No location found", at));
    } else {
        for option in location.split(ALTERNATIVE_SEPARATOR).map(str::trim) {
            if dataset.contains(FieldKind::Locations, option) {
                continue;
            }
            warnings.push(Warning::at_range(
                format!("Unknown location '{}'", option),
                at,
            ));
            if !option.is_empty() {
                unknown.insert(option.to_string());
            }
        }
    }

    parse_modifiers(&segments, at, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::EventModifierKind;
    use pretty_assertions::assert_eq;

    fn lint(value: &str) -> (Vec<Modifier>, Vec<String>, IndexSet<String>) {
        let dataset = ReferenceDataset::from_fields([(FieldKind::Locations, &["108", "ONLINE"][..])]);
        let mut unknown = IndexSet::new();
        let mut warnings = Vec::new();
        let modifiers = lint_location(
            value,
            &CellRange::new(3, 2, 3, 1),
            &dataset,
            &mut unknown,
            &mut warnings,
        );
        let messages = warnings.into_iter().map(|w| w.content).collect();
        (modifiers, messages, unknown)
    }

    #[test]
    fn test_known_alternatives_with_modifiers() {
        let (modifiers, messages, unknown) = lint("108 [ONLY ON 22/01] / ONLINE [FROM 22/02]");

        assert!(messages.is_empty());
        assert!(unknown.is_empty());
        let kinds: Vec<_> = modifiers.iter().map(|m| m.event_kind).collect();
        assert_eq!(kinds, vec![EventModifierKind::OnlyOn, EventModifierKind::From]);
    }

    #[test]
    fn test_spaces_around_slash_are_trimmed() {
        let (modifiers, messages, unknown) = lint("108 / ONLINE");

        assert!(messages.is_empty());
        assert!(unknown.is_empty());
        assert!(modifiers.is_empty());
    }

    #[test]
    fn test_unknown_alternative_is_staged() {
        let (_, messages, unknown) = lint("108/313");

        assert_eq!(messages, vec!["Unknown location '313'"]);
        assert_eq!(unknown.iter().collect::<Vec<_>>(), vec!["313"]);
    }

    #[test]
    fn test_only_modifiers() {
        let (modifiers, messages, _) = lint("[ON TBA]");

        assert_eq!(messages, vec!["No location found"]);
        assert_eq!(modifiers.len(), 1);
        assert_eq!(modifiers[0].event_kind, EventModifierKind::OnTba);
    }

    #[test]
    fn test_empty_alternative_is_not_staged() {
        let (_, messages, unknown) = lint("108/");

        assert_eq!(messages, vec!["Unknown location ''"]);
        assert!(unknown.is_empty());
    }
}
