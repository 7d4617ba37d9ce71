//! Shared domain primitives.
//!
//! Value objects used across the domain: strongly-typed identifiers,
//! UTC timestamps, the user role enum with its capability table, and the
//! `Outcome` type that every state mutation reports through.

mod capability;
mod ids;
mod outcome;
mod role;
mod timestamp;

pub use capability::Capability;
pub use ids::{AlertId, MessageId, NoticeId, RequestId};
pub use outcome::{Outcome, RejectReason};
pub use role::Role;
pub use timestamp::Timestamp;
