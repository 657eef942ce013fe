//! The bracketed annotation language of location cells
//!
//! A location cell looks like `108 [ONLY ON 22/01, 29/01] [STARTS AT 9:20_FROM 05/02]`.
//! Each `[...]` segment holds one or more event modifiers joined by `AND`,
//! optionally followed by `_` and a single additional modifier that limits
//! when the event modifiers apply.
//!
//! | event modifier      | additional modifier |
//! |---------------------|---------------------|
//! | `ON TBA`            | `ON DD/MM, ...`     |
//! | `ONLY ON DD/MM, ...`| `FROM DD/MM`        |
//! | `FROM DD/MM`        | `UNTIL DD/MM`       |
//! | `UNTIL DD/MM`       |                     |
//! | `STARTS AT H:MM`    |                     |
//! | `ENDS AT H:MM`      |                     |
//! | `<room>`            |                     |

use lazy_regex::{lazy_regex, Lazy, Regex};
use serde::Serialize;
use timetable_lint_core::CellRange;

use crate::warning::Warning;

static ON_TBA: Lazy<Regex> = lazy_regex!(r"^ON TBA$");
static ONLY_ON: Lazy<Regex> = lazy_regex!(r"^ONLY ON (?:[0-9]{2}/[0-9]{2},? ?)+$");
static ON: Lazy<Regex> = lazy_regex!(r"^ON (?:[0-9]{2}/[0-9]{2},? ?)+$");
static FROM: Lazy<Regex> = lazy_regex!(r"^FROM [0-9]{2}/[0-9]{2}$");
static UNTIL: Lazy<Regex> = lazy_regex!(r"^UNTIL [0-9]{2}/[0-9]{2}$");
static STARTS_AT: Lazy<Regex> = lazy_regex!(r"^STARTS AT [0-9]{1,2}:[0-9]{2}$");
static ENDS_AT: Lazy<Regex> = lazy_regex!(r"^ENDS AT [0-9]{1,2}:[0-9]{2}$");
static LOCATION: Lazy<Regex> = lazy_regex!(r"^[a-zA-Zа-яА-ЯёЁ0-9\-]+$");

static SEGMENT: Lazy<Regex> = lazy_regex!(r"\[([^\[\]()]+)\]");
static ADDITIONAL: Lazy<Regex> = lazy_regex!(r"_(.+)");

/// Kinds valid as an event modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventModifierKind {
    OnTba,
    OnlyOn,
    From,
    Until,
    StartsAt,
    EndsAt,
    /// A bare room overriding the cell's location
    Location,
}

impl EventModifierKind {
    /// Classify one trimmed event clause; the room form is tried last
    pub fn classify(text: &str) -> Option<Self> {
        let kinds: [(&Lazy<Regex>, Self); 7] = [
            (&ON_TBA, Self::OnTba),
            (&ONLY_ON, Self::OnlyOn),
            (&FROM, Self::From),
            (&UNTIL, Self::Until),
            (&STARTS_AT, Self::StartsAt),
            (&ENDS_AT, Self::EndsAt),
            (&LOCATION, Self::Location),
        ];
        kinds
            .into_iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, kind)| kind)
    }
}

/// Kinds valid only after the `_` delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdditionalModifierKind {
    On,
    From,
    Until,
}

impl AdditionalModifierKind {
    /// Classify an additional modifier; there is no fallback form
    pub fn classify(text: &str) -> Option<Self> {
        if ON.is_match(text) {
            Some(Self::On)
        } else if FROM.is_match(text) {
            Some(Self::From)
        } else if UNTIL.is_match(text) {
            Some(Self::Until)
        } else {
            None
        }
    }
}

/// Qualifier attached to an event modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalModifier {
    pub text: String,
    pub kind: AdditionalModifierKind,
}

/// One classified event clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modifier {
    /// Raw text of the bracket segment the clause came from
    pub origin: String,
    pub event: String,
    pub event_kind: EventModifierKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<AdditionalModifier>,
}

/// Split a location cell into the location proper and its bracket segments
///
/// The location is what remains after removing every `[...]` segment, trimmed.
/// Segments exclude the brackets and keep their inner text untouched.
pub fn split_location(text: &str) -> (String, Vec<&str>) {
    let segments = SEGMENT
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    let location = SEGMENT.replace_all(text, "").trim().to_string();
    (location, segments)
}

/// Classify the clauses of every segment, in order
///
/// Unclassifiable clauses produce a warning located at `at` and no
/// [`Modifier`]. A clause whose additional part does not classify is dropped
/// as a whole, even though its event part is valid.
pub fn parse_modifiers(segments: &[&str], at: &CellRange, warnings: &mut Vec<Warning>) -> Vec<Modifier> {
    let mut modifiers = Vec::new();

    for &segment in segments {
        let (event_part, additional) = match ADDITIONAL.captures(segment) {
            Some(caps) => {
                let additional = caps.get(1).map(|m| m.as_str());
                let event_part = ADDITIONAL.replace(segment, "");
                (event_part.trim().to_string(), additional)
            }
            None => (segment.to_string(), None),
        };

        for clause in event_part.split("AND").map(str::trim) {
            let Some(event_kind) = EventModifierKind::classify(clause) else {
                warnings.push(Warning::at_range(
                    format!("Unknown event modifier '{}'", clause),
                    at,
                ));
                continue;
            };

            let additional = match additional {
                Some(text) => match AdditionalModifierKind::classify(text) {
                    Some(kind) => Some(AdditionalModifier {
                        text: text.to_string(),
                        kind,
                    }),
                    None => {
                        warnings.push(Warning::at_range(
                            format!("Unknown additional modifier '{}'", text),
                            at,
                        ));
                        continue;
                    }
                },
                None => None,
            };

            modifiers.push(Modifier {
                origin: segment.to_string(),
                event: clause.to_string(),
                event_kind,
                additional,
            });
        }
    }

    modifiers
}
