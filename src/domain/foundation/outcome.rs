//! Outcome type for session mutations.
//!
//! Validation and authorization rejections are values, not errors: a
//! rejected mutation leaves state untouched and the caller may simply
//! resubmit. Nothing in the session layer is fatal.

use super::Capability;
use std::fmt;

/// Why a mutation was rejected without being applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A required text field was empty or whitespace-only.
    BlankField(&'static str),
    /// The acting role does not hold the required capability.
    MissingCapability(Capability),
    /// The target request has already been approved or rejected.
    AlreadyResolved,
    /// No entity with the given identifier exists.
    UnknownTarget,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::BlankField(field) => write!(f, "required field '{}' is blank", field),
            RejectReason::MissingCapability(cap) => {
                write!(f, "role lacks capability {:?}", cap)
            }
            RejectReason::AlreadyResolved => write!(f, "request already resolved"),
            RejectReason::UnknownTarget => write!(f, "no entity with that identifier"),
        }
    }
}

/// Result of a session mutation: either applied with a value, or
/// rejected with a reason and no state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The mutation was applied; carries the produced value.
    Applied(T),
    /// The mutation was withheld; state is unchanged.
    Rejected(RejectReason),
}

impl<T> Outcome<T> {
    /// Creates an applied outcome.
    pub fn applied(value: T) -> Self {
        Outcome::Applied(value)
    }

    /// Creates a rejected outcome.
    pub fn rejected(reason: RejectReason) -> Self {
        Outcome::Rejected(reason)
    }

    /// Returns true if the mutation was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// Returns true if the mutation was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// Returns the applied value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    /// Consumes the outcome and returns the applied value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    /// Returns the rejection reason, if any.
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Rejected(reason) => Some(reason),
        }
    }

    /// Maps the applied value, leaving rejections untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
        }
    }
}
