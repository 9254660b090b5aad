//! Existence checks for referenced records.

use std::fmt::Display;

use tracing::error;

/// Outcome of looking up whether a referenced record is present.
///
/// Lookups never fail outright: a storage problem is reported as [`Existence::Fault`]
/// so callers can tell "not there" apart from "could not tell".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Existence {
    /// The record is present.
    Found,

    /// The record is absent (or soft-deleted).
    Absent,

    /// The lookup itself failed.
    Fault,
}

impl Existence {
    /// Fold the result of an `EXISTS` lookup into an outcome, logging any failure.
    pub(crate) fn from_lookup<E: Display>(
        result: Result<bool, E>,
        kind: &str,
        id: impl Display,
    ) -> Self {
        match result {
            Ok(true) => Self::Found,
            Ok(false) => Self::Absent,
            Err(source) => {
                error!(kind, id = %id, "existence lookup failed: {source}");

                Self::Fault
            }
        }
    }
}
