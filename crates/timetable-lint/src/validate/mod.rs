//! Field validators
//!
//! Every validator appends [`Warning`](crate::Warning)s to a caller-owned sink
//! and never fails on malformed content.

mod course;
mod group;
mod hygiene;
mod location;
mod subject;

pub use course::{lint_course, NO_COURSE};
pub use group::{lint_group, Group};
pub use hygiene::{check_brackets, fix_spacing, lint_hygiene};
pub use location::lint_location;
pub use subject::{lint_subject, Subject, SUBJECT_TYPES};
