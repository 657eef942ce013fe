//! Weighted edit distance and nearest-match suggestions
//!
//! With unequal insert/remove costs the distance is not symmetric:
//! `distance(a, b)` charges `remove` for characters of `a` that must go and
//! `insert` for characters of `b` that must appear. The default costs are all
//! 1, which gives plain Levenshtein distance where a case-only difference
//! counts as a full substitution.

/// Costs of the four edit operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCosts {
    /// Substituting one character for a different one
    pub replace: u32,
    /// Substituting a character for the same letter in another case
    pub replace_case: u32,
    /// Inserting a character
    pub insert: u32,
    /// Removing a character
    pub remove: u32,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            replace: 1,
            replace_case: 1,
            insert: 1,
            remove: 1,
        }
    }
}

/// Distances at or above this are never suggested
pub const SUGGESTION_CEILING: u32 = 100;

/// Weighted Levenshtein distance from `source` to `target`
pub fn distance(source: &str, target: &str, costs: &EditCosts) -> u32 {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    let mut previous: Vec<u32> = (0..=target.len() as u32).map(|j| j * costs.insert).collect();
    let mut current = vec![0u32; target.len() + 1];

    for (i, &s) in source.iter().enumerate() {
        current[0] = (i as u32 + 1) * costs.remove;

        for (j, &t) in target.iter().enumerate() {
            let substitution = if s == t {
                0
            } else if same_letter_ignoring_case(s, t) {
                costs.replace_case
            } else {
                costs.replace
            };

            current[j + 1] = (previous[j + 1] + costs.remove)
                .min(current[j] + costs.insert)
                .min(previous[j] + substitution);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}

fn same_letter_ignoring_case(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

/// The candidate closest to `needle`
///
/// Only a strictly smaller distance replaces the current best, so ties keep
/// the earliest candidate. Nothing at or above [`SUGGESTION_CEILING`] is
/// returned.
pub fn nearest<'a, I>(needle: &str, candidates: I, costs: &EditCosts) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best = None;
    let mut best_distance = SUGGESTION_CEILING;

    for candidate in candidates {
        let d = distance(needle, candidate, costs);
        if d < best_distance {
            best_distance = d;
            best = Some(candidate);
        }
    }

    best
}
