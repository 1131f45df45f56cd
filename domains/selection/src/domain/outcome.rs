//! Result of adding an outfit item

use thiserror::Error;

/// Why an outfit item was not added.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("Remove the full outfit first before adding separate pieces")]
    FullOutfitConflict,

    #[error("An outfit can combine at most 3 pieces")]
    CapacityExceeded,
}

/// Outcome of `add_outfit_item`.
///
/// Rejection is an expected result, so it is a value rather than an `Err`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Rejected(RejectReason),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added)
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            AddOutcome::Added => None,
            AddOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

impl From<AddOutcome> for bool {
    fn from(outcome: AddOutcome) -> Self {
        outcome.is_added()
    }
}
